pub mod problem;
pub mod types;

pub use problem::{equal_state, Problem};
pub use types::{Mover, Value};
