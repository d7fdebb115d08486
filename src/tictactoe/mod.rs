pub mod board;
pub mod eval;
pub mod symmetry;

pub use board::{Board, Mark, TicTacToe};
pub use eval::{evaluator, features, DEFAULT_WEIGHTS, FEATURE_NAMES};
