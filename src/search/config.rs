use super::alpha_beta::AlphaBetaSearch;
use super::evaluator::Evaluator;
use super::hashing::{HashingMinimaxSearch, ZobristHashable, DEFAULT_TABLE_ENTRIES};
use super::minimax::{MinimaxSearch, MinimaxStrategy};
use crate::core::Problem;
use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a search strategy is put together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth_limit: usize,
    pub alpha_beta: bool,
    pub hashing: bool,
    pub table_entries: usize,
}

impl SearchConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: SearchConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("using default search config: {}", e);
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.depth_limit == 0 {
            return Err(SearchError::InvalidDepthLimit {
                limit: self.depth_limit,
            });
        }
        Ok(())
    }

    /// Base minimax, optionally wrapped in alpha-beta, optionally wrapped
    /// in the transposition table.
    pub fn build<P>(
        &self,
        problem: P,
        evaluator: Box<dyn Evaluator<P::State>>,
    ) -> Result<Box<dyn MinimaxStrategy<Problem = P>>, SearchError>
    where
        P: Problem + 'static,
        P::State: ZobristHashable + 'static,
        P::Action: 'static,
    {
        self.validate()?;
        let base = MinimaxSearch::with_boxed_evaluator(problem, evaluator, self.depth_limit);
        let strategy: Box<dyn MinimaxStrategy<Problem = P>> = match (self.alpha_beta, self.hashing) {
            (false, false) => Box::new(base),
            (true, false) => Box::new(AlphaBetaSearch::new(base)),
            (false, true) => Box::new(HashingMinimaxSearch::with_capacity(base, self.table_entries)),
            (true, true) => Box::new(HashingMinimaxSearch::with_capacity(
                AlphaBetaSearch::new(base),
                self.table_entries,
            )),
        };
        Ok(strategy)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth_limit: 2,
            alpha_beta: true,
            hashing: true,
            table_entries: DEFAULT_TABLE_ENTRIES,
        }
    }
}
