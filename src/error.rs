//! Error types for the search engine and the genetic engine

use thiserror::Error;

/// Failures of a single `search` call.
///
/// None of these are transient. They point at a broken model (problem,
/// evaluator) or at a misconfigured strategy, so the search is aborted and
/// the error handed back to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    #[error("depth limit must be at least 1, got {limit}")]
    InvalidDepthLimit { limit: usize },

    #[error("non-terminal state at depth {depth} has no available actions")]
    NoActions { depth: usize },

    #[error("illegal action generated at depth {depth}: {action}")]
    IllegalAction { depth: usize, action: String },

    #[error("evaluator returned a non-numeric value at depth {depth}")]
    NonNumericEvaluation { depth: usize },

    #[error("root state is terminal, there is no move to choose")]
    NoMoveAvailable,

    #[error("invalid symmetry {index}: {reason}")]
    InvalidSymmetry { index: usize, reason: String },

    #[error("evaluator has {features} features but {weights} weights were supplied")]
    WeightCountMismatch { features: usize, weights: usize },
}

/// Failures of the genetic engine.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GeneticsError {
    #[error("reproduction method has no population set")]
    NoPopulation,

    #[error("cut point {cut} is out of range for a genotype of length {len}")]
    CutPointOutOfRange { cut: usize, len: usize },

    #[error("genotype lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("gene {index} lies outside its domain")]
    GeneOutOfDomain { index: usize },

    #[error("invalid weight domain: {message}")]
    InvalidDomain { message: String },
}
