pub mod alpha_beta;
pub mod config;
pub mod evaluator;
pub mod hashing;
pub mod minimax;
pub mod node;
pub mod tt;
pub mod weighted;
pub mod zobrist;

pub use alpha_beta::AlphaBetaSearch;
pub use config::SearchConfig;
pub use evaluator::{Evaluator, FnEvaluator};
pub use hashing::{HashingMinimaxSearch, ZobristHashable};
pub use minimax::{MinimaxSearch, MinimaxStrategy, SearchResult};
pub use node::{NodeId, SearchNode, SearchStats, SearchTree};
pub use weighted::{Feature, LinearEvaluator};
pub use zobrist::{Symmetry, SymmetryGroup, ZobristHasher, ZobristTable};
