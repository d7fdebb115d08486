use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar desirability of a state, always from the root mover's point of view.
pub type Value = f64;

/// Which side of the minimax recursion a node belongs to.
///
/// The root is a MAX node and roles alternate with depth parity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mover {
    #[default]
    Max,
    Min,
}

impl Mover {
    pub fn at_depth(depth: usize) -> Mover {
        if depth % 2 == 0 {
            Mover::Max
        } else {
            Mover::Min
        }
    }

    pub fn opponent(self) -> Mover {
        match self {
            Mover::Max => Mover::Min,
            Mover::Min => Mover::Max,
        }
    }

    /// True when `candidate` strictly improves on `incumbent` for this mover.
    pub fn prefers(self, candidate: Value, incumbent: Value) -> bool {
        match self {
            Mover::Max => candidate > incumbent,
            Mover::Min => candidate < incumbent,
        }
    }
}

impl fmt::Display for Mover {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mover::Max => write!(f, "MAX"),
            Mover::Min => write!(f, "MIN"),
        }
    }
}
