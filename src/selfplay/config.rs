use crate::genetics::WeightDomain;
use crate::search::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 学習設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Offspring per breeding pair.
    pub multiplicator: usize,
    /// Fittest individuals carried over unchanged.
    pub keep: usize,
    pub games_per_individual: usize,
    /// Random moves played before the players take over.
    pub opening_plies: usize,
    pub max_plies: usize,
    pub seed: Option<u64>,
    pub parallel: bool,
    pub search: SearchConfig,
    pub weights: WeightDomain,
    pub output_dir: PathBuf,
}

impl TrainingConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: TrainingConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("using default training config: {}", e);
            Self::default()
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.population_size == 0 {
            anyhow::bail!("population_size must be at least 1");
        }
        if self.generations == 0 {
            anyhow::bail!("generations must be at least 1");
        }
        if self.multiplicator == 0 {
            anyhow::bail!("multiplicator must be at least 1");
        }
        if self.games_per_individual == 0 {
            anyhow::bail!("games_per_individual must be at least 1");
        }
        self.search.validate()?;
        self.weights.validate()?;
        Ok(())
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            population_size: 12,
            generations: 10,
            multiplicator: 2,
            keep: 2,
            games_per_individual: 6,
            opening_plies: 2,
            max_plies: 9,
            seed: None,
            parallel: true,
            search: SearchConfig::default(),
            weights: WeightDomain::default(),
            output_dir: PathBuf::from("trained_weights"),
        }
    }
}
