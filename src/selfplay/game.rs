use crate::core::Problem;
use crate::error::SearchError;
use crate::player::PlayerController;
use crate::tictactoe::{Board, Mark, TicTacToe};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 対局結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub winner: Option<Mark>,
    pub moves: Vec<usize>,
    /// True when a player had nothing to play and gave up.
    pub resigned: bool,
}

impl GameRecord {
    /// 1 for a win, 0.5 for a draw, 0 for a loss.
    pub fn score_for(&self, mark: Mark) -> f64 {
        match self.winner {
            Some(m) if m == mark => 1.0,
            Some(_) => 0.0,
            None => 0.5,
        }
    }
}

/// Plays one game from the empty board. The first `opening_plies` moves are
/// drawn at random from `rng`, after that the controllers take turns. A game
/// still running after `max_plies` moves counts as a draw.
pub fn play_game<R: Rng + ?Sized>(
    game: &TicTacToe,
    x: &mut dyn PlayerController<TicTacToe>,
    o: &mut dyn PlayerController<TicTacToe>,
    opening_plies: usize,
    max_plies: usize,
    rng: &mut R,
) -> Result<GameRecord, SearchError> {
    let mut board: Board = game.initial_state();
    let mut moves = Vec::new();

    while moves.len() < max_plies && !game.is_terminal(&board) {
        let legal_moves = game.generate_actions(&board);
        let current = board.to_move();

        let chosen = if moves.len() < opening_plies {
            legal_moves.choose(rng).copied()
        } else {
            let controller: &mut dyn PlayerController<TicTacToe> = match current {
                Mark::X => &mut *x,
                Mark::O => &mut *o,
            };
            controller.choose_move(game, &board, &legal_moves)?
        };

        let Some(cell) = chosen else {
            return Ok(GameRecord {
                winner: Some(current.opponent()),
                moves,
                resigned: true,
            });
        };
        if !game.is_legal(&board, &cell) {
            return Err(SearchError::IllegalAction {
                depth: 0,
                action: format!("{:?}", cell),
            });
        }
        board = game.apply(&board, &cell);
        moves.push(cell);
    }

    Ok(GameRecord {
        winner: board.winner(),
        moves,
        resigned: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{RandomPlayer, SearchPlayer};
    use crate::search::SearchConfig;
    use crate::tictactoe::{evaluator, DEFAULT_WEIGHTS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn search_player(game: &TicTacToe, mark: Mark) -> SearchPlayer<TicTacToe> {
        let config = SearchConfig {
            depth_limit: 9,
            ..SearchConfig::default()
        };
        let eval = evaluator(mark, &DEFAULT_WEIGHTS).unwrap();
        SearchPlayer::new(&mark.to_string(), config.build(game.clone(), Box::new(eval)).unwrap())
    }

    #[test]
    fn test_perfect_play_is_a_draw() {
        let game = TicTacToe::new(&mut StdRng::seed_from_u64(5));
        let mut x = search_player(&game, Mark::X);
        let mut o = search_player(&game, Mark::O);
        let record = play_game(&game, &mut x, &mut o, 0, 9, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(record.winner, None);
        assert_eq!(record.moves.len(), 9);
        assert_eq!(record.score_for(Mark::X), 0.5);
    }

    #[test]
    fn test_full_search_never_loses_to_random() {
        let game = TicTacToe::new(&mut StdRng::seed_from_u64(5));
        for seed in 0..5 {
            let mut x = search_player(&game, Mark::X);
            let mut o = RandomPlayer::new("random", seed);
            let record = play_game(&game, &mut x, &mut o, 0, 9, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_ne!(record.winner, Some(Mark::O), "seed {}: {:?}", seed, record.moves);
        }
    }

    #[test]
    fn test_ply_limit_ends_in_a_draw() {
        let game = TicTacToe::new(&mut StdRng::seed_from_u64(5));
        let mut x = RandomPlayer::new("x", 1);
        let mut o = RandomPlayer::new("o", 2);
        let record = play_game(&game, &mut x, &mut o, 2, 3, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(record.moves.len(), 3);
        assert_eq!(record.winner, None);
        assert!(!record.resigned);
    }
}
