#[cfg(test)]
mod tests {
    use crate::core::{Problem, Value};
    use crate::error::SearchError;
    use crate::search::{
        AlphaBetaSearch, FnEvaluator, HashingMinimaxSearch, MinimaxSearch, MinimaxStrategy,
        SearchConfig, SearchResult, ZobristHashable,
    };
    use crate::tictactoe::{evaluator, Board, Mark, TicTacToe, DEFAULT_WEIGHTS};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Node of an explicit game tree.
    #[derive(Debug, Clone, PartialEq)]
    struct TreeNode(usize);

    impl ZobristHashable for TreeNode {
        fn zobrist_hash(&self) -> u64 {
            (self.0 as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        }
    }

    /// A game given as an explicit tree; actions are child node ids.
    #[derive(Debug, Clone)]
    struct ExplicitTree {
        children: Vec<Vec<usize>>,
        values: Arc<Vec<Value>>,
    }

    impl ExplicitTree {
        fn evaluator(&self) -> FnEvaluator<impl Fn(&TreeNode) -> Value + Send + Sync> {
            let values = self.values.clone();
            FnEvaluator::new("table", move |s: &TreeNode| values[s.0])
        }
    }

    impl Problem for ExplicitTree {
        type State = TreeNode;
        type Action = usize;

        fn generate_actions(&self, state: &TreeNode) -> Vec<usize> {
            self.children[state.0].clone()
        }

        fn apply(&self, _state: &TreeNode, action: &usize) -> TreeNode {
            TreeNode(*action)
        }

        fn is_terminal(&self, state: &TreeNode) -> bool {
            self.children[state.0].is_empty()
        }
    }

    // MAX root 0 with MIN children 1, 2, 3 over leaves 4..=12
    fn three_by_three() -> ExplicitTree {
        let mut children = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9], vec![10, 11, 12]];
        children.extend(std::iter::repeat(Vec::new()).take(9));
        let mut values = vec![0.0; 4];
        values.extend([3.0, 12.0, 8.0, 2.0, 4.0, 6.0, 14.0, 5.0, 2.0]);
        ExplicitTree {
            children,
            values: Arc::new(values),
        }
    }

    fn random_tree(rng: &mut StdRng, depth: usize) -> ExplicitTree {
        let mut children = vec![Vec::new()];
        let mut values = vec![0.0];
        let mut frontier = vec![0];
        for _ in 0..depth {
            let mut next = Vec::new();
            for parent in frontier {
                for _ in 0..rng.gen_range(1..=4) {
                    let id = children.len();
                    children.push(Vec::new());
                    // integers, so ties are common
                    values.push(rng.gen_range(-10..=10) as f64);
                    children[parent].push(id);
                    next.push(id);
                }
            }
            frontier = next;
        }
        ExplicitTree {
            children,
            values: Arc::new(values),
        }
    }

    fn plain(tree: &ExplicitTree, depth: usize) -> MinimaxSearch<ExplicitTree> {
        MinimaxSearch::new(tree.clone(), tree.evaluator(), depth)
    }

    #[test]
    fn test_minimax_backs_up_values() {
        let tree = three_by_three();
        let result = plain(&tree, 2).search(&TreeNode(0)).unwrap();

        assert_eq!(result.action, 1);
        assert_eq!(result.value, 3.0);
        assert_eq!(result.principal_variation, vec![1, 4]);
        assert_eq!(result.stats.leaves_evaluated, 9);
        assert_eq!(result.stats.cutoffs, 0);
    }

    #[test]
    fn test_alpha_beta_prunes_without_changing_the_choice() {
        let tree = three_by_three();
        let result = AlphaBetaSearch::new(plain(&tree, 2)).search(&TreeNode(0)).unwrap();

        assert_eq!(result.action, 1);
        assert_eq!(result.value, 3.0);
        // the second MIN node is refuted by its first leaf
        assert_eq!(result.stats.cutoffs, 1);
        assert_eq!(result.stats.pruned_children, 2);
        assert_eq!(result.stats.leaves_evaluated, 7);
    }

    #[test]
    fn test_depth_limit_cuts_the_tree() {
        let tree = three_by_three();
        // nodes 1..=3 are evaluated directly at depth 1
        let result = plain(&tree, 1).search(&TreeNode(0)).unwrap();
        assert_eq!(result.action, 1);
        assert_eq!(result.value, 0.0);
        assert_eq!(result.stats.leaves_evaluated, 3);
    }

    #[test]
    fn test_variants_agree_on_random_trees() {
        let mut rng = StdRng::seed_from_u64(1234);
        for round in 0..40 {
            let depth = rng.gen_range(2..=5);
            let tree = random_tree(&mut rng, depth);
            let root = TreeNode(0);

            let reference = plain(&tree, depth).search(&root).unwrap();
            let pruned = AlphaBetaSearch::new(plain(&tree, depth)).search(&root).unwrap();
            let hashed = HashingMinimaxSearch::new(AlphaBetaSearch::new(plain(&tree, depth)))
                .search(&root)
                .unwrap();

            for other in [&pruned, &hashed] {
                assert_eq!(other.action, reference.action, "round {}", round);
                assert_eq!(other.value, reference.value, "round {}", round);
            }
            assert!(pruned.stats.leaves_evaluated <= reference.stats.leaves_evaluated);
        }
    }

    fn strategy(
        game: &TicTacToe,
        depth: usize,
        alpha_beta: bool,
        hashing: bool,
    ) -> Box<dyn MinimaxStrategy<Problem = TicTacToe>> {
        let config = SearchConfig {
            depth_limit: depth,
            alpha_beta,
            hashing,
            ..SearchConfig::default()
        };
        let mover = Mark::X;
        config
            .build(game.clone(), Box::new(evaluator(mover, &DEFAULT_WEIGHTS).unwrap()))
            .unwrap()
    }

    fn random_positions(game: &TicTacToe, count: usize, seed: u64) -> Vec<Board> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut positions = Vec::new();
        while positions.len() < count {
            let mut board = game.initial_state();
            let plies = rng.gen_range(0..=6);
            for _ in 0..plies {
                if game.is_terminal(&board) {
                    break;
                }
                let cell = *game.generate_actions(&board).choose(&mut rng).unwrap();
                board = game.apply(&board, &cell);
            }
            // the evaluator is fixed to X, so X must be the root mover
            if !game.is_terminal(&board) && board.to_move() == Mark::X {
                positions.push(board);
            }
        }
        positions
    }

    fn summary(result: &SearchResult<usize>) -> (usize, Value) {
        (result.action, result.value)
    }

    #[test]
    fn test_hashing_is_transparent_on_tictactoe() {
        let game = TicTacToe::new(&mut StdRng::seed_from_u64(77));
        for board in random_positions(&game, 25, 5) {
            for depth in 1..=4 {
                let reference = strategy(&game, depth, false, false).search(&board).unwrap();
                for (alpha_beta, hashing) in [(true, false), (false, true), (true, true)] {
                    let result = strategy(&game, depth, alpha_beta, hashing).search(&board).unwrap();
                    assert_eq!(
                        summary(&result),
                        summary(&reference),
                        "depth {} ab {} hash {}\n{}",
                        depth,
                        alpha_beta,
                        hashing,
                        board
                    );
                }
            }
        }
    }

    #[test]
    fn test_decorators_compose_in_either_order() {
        let game = TicTacToe::new(&mut StdRng::seed_from_u64(77));
        let eval = || evaluator(Mark::X, &DEFAULT_WEIGHTS).unwrap();
        for board in random_positions(&game, 10, 9) {
            let base = || MinimaxSearch::new(game.clone(), eval(), 3);
            let hash_outside = HashingMinimaxSearch::new(AlphaBetaSearch::new(base()))
                .search(&board)
                .unwrap();
            let hash_inside = AlphaBetaSearch::new(HashingMinimaxSearch::new(base()))
                .search(&board)
                .unwrap();
            assert_eq!(summary(&hash_outside), summary(&hash_inside));
        }
    }

    #[test]
    fn test_symmetric_replies_are_searched_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counting = |game: &TicTacToe| {
            let calls = calls.clone();
            let inner = evaluator(Mark::X, &DEFAULT_WEIGHTS).unwrap();
            let eval = FnEvaluator::new("counting", move |b: &Board| {
                calls.fetch_add(1, Ordering::SeqCst);
                crate::search::Evaluator::eval(&inner, b)
            });
            HashingMinimaxSearch::new(MinimaxSearch::new(game.clone(), eval, 1))
        };

        // centre, corner, edge: the nine first moves fall into three classes
        let game = TicTacToe::new(&mut StdRng::seed_from_u64(3));
        let result = counting(&game).search(&game.initial_state()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(result.stats.cache_hits, 6);

        calls.store(0, Ordering::SeqCst);
        let plain_game = TicTacToe::without_symmetry(&mut StdRng::seed_from_u64(3));
        let result = counting(&plain_game).search(&plain_game.initial_state()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 9);
        assert_eq!(result.stats.cache_hits, 0);
    }

    #[test]
    fn test_table_does_not_leak_between_searches() {
        let game = TicTacToe::new(&mut StdRng::seed_from_u64(3));
        let mut search = strategy(&game, 2, true, true);
        let board = game.initial_state();
        let first = search.search(&board).unwrap();
        let second = search.search(&board).unwrap();
        assert_eq!(first, second);

        let eval = evaluator(Mark::X, &DEFAULT_WEIGHTS).unwrap();
        let mut hashed = HashingMinimaxSearch::with_capacity(MinimaxSearch::new(game.clone(), eval, 2), 64);
        assert_eq!(hashed.table().capacity(), 64);
        hashed.search(&board).unwrap();
        let filled = hashed.table().occupied();
        assert!(filled > 0);
        hashed.search(&board).unwrap();
        assert_eq!(hashed.table().occupied(), filled);
    }

    #[test]
    fn test_settings_reach_the_base_through_decorators() {
        let game = TicTacToe::new(&mut StdRng::seed_from_u64(3));
        let mut search = strategy(&game, 1, true, true);
        search.set_depth_limit(3);
        assert_eq!(search.depth_limit(), 3);

        search.set_evaluator(Box::new(FnEvaluator::new("flat", |_: &Board| 0.0)));
        assert_eq!(search.evaluator().name(), "flat");
        let result = search.search(&game.initial_state()).unwrap();
        assert_eq!(result.value, 0.0);
        assert_eq!(result.principal_variation.len(), 3);
    }

    // Never-ending game with a broken rule set.
    #[derive(Debug, Clone)]
    struct Broken {
        actions: Vec<usize>,
        legal: bool,
    }

    impl Problem for Broken {
        type State = TreeNode;
        type Action = usize;

        fn generate_actions(&self, _state: &TreeNode) -> Vec<usize> {
            self.actions.clone()
        }

        fn apply(&self, _state: &TreeNode, action: &usize) -> TreeNode {
            TreeNode(*action)
        }

        fn is_legal(&self, _state: &TreeNode, _action: &usize) -> bool {
            self.legal
        }
    }

    #[test]
    fn test_model_errors_abort_the_search() {
        let flat = || FnEvaluator::new("flat", |_: &TreeNode| 0.0);
        let root = TreeNode(0);

        let stuck = Broken {
            actions: vec![],
            legal: true,
        };
        assert_eq!(
            MinimaxSearch::new(stuck, flat(), 2).search(&root).unwrap_err(),
            SearchError::NoActions { depth: 0 }
        );

        let cheating = Broken {
            actions: vec![1, 2],
            legal: false,
        };
        assert_eq!(
            MinimaxSearch::new(cheating, flat(), 2).search(&root).unwrap_err(),
            SearchError::IllegalAction {
                depth: 0,
                action: "1".to_string()
            }
        );

        let tree = three_by_three();
        let nan = FnEvaluator::new("nan", |_: &TreeNode| Value::NAN);
        assert_eq!(
            MinimaxSearch::new(tree, nan, 1).search(&root).unwrap_err(),
            SearchError::NonNumericEvaluation { depth: 1 }
        );
    }

    #[test]
    fn test_invalid_search_requests() {
        let tree = three_by_three();
        assert_eq!(
            plain(&tree, 0).search(&TreeNode(0)).unwrap_err(),
            SearchError::InvalidDepthLimit { limit: 0 }
        );
        assert_eq!(
            plain(&tree, 2).search(&TreeNode(4)).unwrap_err(),
            SearchError::NoMoveAvailable
        );
    }
}
