//! Generic game-tree search with pluggable pruning and Zobrist/symmetry
//! transposition caching, plus a genetic engine for tuning evaluation
//! weights by self-play.

pub mod core;
pub mod error;
pub mod genetics;
pub mod player;
pub mod search;
pub mod selfplay;
pub mod tictactoe;

mod search_tests;

pub use error::{GeneticsError, SearchError};
