use crate::core::Problem;
use crate::error::SearchError;
use crate::player::PlayerController;
use crate::search::{MinimaxStrategy, SearchStats};
use log::debug;

/// Plays the root action chosen by a minimax strategy.
pub struct SearchPlayer<P: Problem> {
    pub name: String,
    strategy: Box<dyn MinimaxStrategy<Problem = P>>,
    /// Counters summed over every search this player ran.
    pub stats: SearchStats,
}

impl<P: Problem> SearchPlayer<P> {
    pub fn new(name: &str, strategy: Box<dyn MinimaxStrategy<Problem = P>>) -> Self {
        Self {
            name: name.to_string(),
            strategy,
            stats: SearchStats::default(),
        }
    }

    pub fn strategy(&self) -> &dyn MinimaxStrategy<Problem = P> {
        self.strategy.as_ref()
    }
}

impl<P: Problem> PlayerController<P> for SearchPlayer<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(
        &mut self,
        _problem: &P,
        state: &P::State,
        legal_moves: &[P::Action],
    ) -> Result<Option<P::Action>, SearchError> {
        if legal_moves.is_empty() {
            return Ok(None);
        }
        let result = match self.strategy.search(state) {
            Ok(result) => result,
            Err(SearchError::NoMoveAvailable) => return Ok(None),
            Err(e) => return Err(e),
        };

        self.stats += result.stats;

        debug!(
            "{} plays {:?} (value {:.3}, pv {:?})",
            self.name, result.action, result.value, result.principal_variation
        );
        Ok(Some(result.action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::RandomPlayer;
    use crate::search::SearchConfig;
    use crate::tictactoe::{evaluator, Mark, TicTacToe, DEFAULT_WEIGHTS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn player(game: &TicTacToe, mark: Mark, depth: usize) -> SearchPlayer<TicTacToe> {
        let config = SearchConfig {
            depth_limit: depth,
            ..SearchConfig::default()
        };
        let eval = evaluator(mark, &DEFAULT_WEIGHTS).unwrap();
        SearchPlayer::new("search", config.build(game.clone(), Box::new(eval)).unwrap())
    }

    #[test]
    fn test_takes_the_win() {
        let game = TicTacToe::new(&mut StdRng::seed_from_u64(1));
        let mut board = game.initial_state();
        // X: 0 1, O: 3 4, X to move
        for cell in [0, 3, 1, 4] {
            board.place(cell);
        }
        let mut x = player(&game, Mark::X, 1);
        let legal = game.generate_actions(&board);
        assert_eq!(x.choose_move(&game, &board, &legal).unwrap(), Some(2));
        assert!(x.stats.leaves_evaluated > 0);
    }

    #[test]
    fn test_blocks_the_opponent() {
        let game = TicTacToe::new(&mut StdRng::seed_from_u64(1));
        let mut board = game.initial_state();
        // X: 0 8, O: 4 1, X to move; O threatens 7
        for cell in [0, 4, 8, 1] {
            board.place(cell);
        }
        let mut x = player(&game, Mark::X, 2);
        let legal = game.generate_actions(&board);
        assert_eq!(x.choose_move(&game, &board, &legal).unwrap(), Some(7));
    }

    #[test]
    fn test_no_legal_moves_means_no_move() {
        let game = TicTacToe::new(&mut StdRng::seed_from_u64(1));
        let board = game.initial_state();
        let mut x = player(&game, Mark::X, 1);
        assert_eq!(x.choose_move(&game, &board, &[]).unwrap(), None);

        let mut random = RandomPlayer::new("random", 4);
        let legal = game.generate_actions(&board);
        let mv = PlayerController::<TicTacToe>::choose_move(&mut random, &game, &board, &legal).unwrap();
        assert!(legal.contains(&mv.unwrap()));
    }
}
