//! Evaluation features for tic-tac-toe
//!
//! Every feature is seen from one player's side and is invariant under the
//! board symmetries, so symmetric positions evaluate identically and can
//! share transposition-table entries.

use super::board::{Board, Mark, CENTRE, CORNERS, EDGES, LINES};
use crate::search::weighted::{Feature, LinearEvaluator};
use crate::error::SearchError;

pub const FEATURE_NAMES: [&str; 6] = ["outcome", "open_lines", "threats", "centre", "corners", "edges"];

/// Hand-tuned weights, the outcome dominating everything else.
pub const DEFAULT_WEIGHTS: [f64; 6] = [10.0, 0.5, 1.0, 0.3, 0.2, 0.1];

fn outcome(board: &Board, player: Mark) -> f64 {
    match board.winner() {
        Some(m) if m == player => 1.0,
        Some(_) => -1.0,
        None => 0.0,
    }
}

// lines one side has started and the other has not blocked
fn open_lines(board: &Board, player: Mark) -> f64 {
    let mut score = 0i32;
    for line in &LINES {
        match board.line_counts(line, player) {
            (own, 0) if own > 0 => score += 1,
            (0, other) if other > 0 => score -= 1,
            _ => {}
        }
    }
    score as f64 / LINES.len() as f64
}

// two in a row with the third cell free
fn threats(board: &Board, player: Mark) -> f64 {
    let mut score = 0i32;
    for line in &LINES {
        match board.line_counts(line, player) {
            (2, 0) => score += 1,
            (0, 2) => score -= 1,
            _ => {}
        }
    }
    score as f64 / LINES.len() as f64
}

fn occupancy(board: &Board, player: Mark, cells: &[usize]) -> f64 {
    let score: i32 = cells
        .iter()
        .map(|&c| match board.get(c) {
            Some(m) if m == player => 1,
            Some(_) => -1,
            None => 0,
        })
        .sum();
    score as f64 / cells.len() as f64
}

/// The features in [`FEATURE_NAMES`] order, seen from `player`'s side.
pub fn features(player: Mark) -> Vec<Feature<Board>> {
    vec![
        Feature::new(FEATURE_NAMES[0], move |b: &Board| outcome(b, player)),
        Feature::new(FEATURE_NAMES[1], move |b: &Board| open_lines(b, player)),
        Feature::new(FEATURE_NAMES[2], move |b: &Board| threats(b, player)),
        Feature::new(FEATURE_NAMES[3], move |b: &Board| occupancy(b, player, &[CENTRE])),
        Feature::new(FEATURE_NAMES[4], move |b: &Board| occupancy(b, player, &CORNERS)),
        Feature::new(FEATURE_NAMES[5], move |b: &Board| occupancy(b, player, &EDGES)),
    ]
}

pub fn evaluator(player: Mark, weights: &[f64]) -> Result<LinearEvaluator<Board>, SearchError> {
    LinearEvaluator::new(&format!("linear-{}", player), features(player), weights.to_vec())
}
