//! Weight evolution by self-play
//!
//! Every generation each individual plays a few games against opponents
//! drawn from the same population; its fitness is the mean game score. The
//! scored population is then bred into the next generation.

use super::config::TrainingConfig;
use super::game::play_game;
use crate::error::{GeneticsError, SearchError};
use crate::genetics::{
    GeneticIndividual, GeneticPopulation, KeepBestPairwiseReproduction, ReproductionMethod,
    WeightDomain, WeightIndividual,
};
use crate::player::SearchPlayer;
use crate::search::SearchConfig;
use crate::tictactoe::{evaluator, Mark, TicTacToe, FEATURE_NAMES};
use chrono::Local;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub generation: usize,
    pub population_size: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub best_weights: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub feature_names: Vec<String>,
    pub generations: Vec<GenerationSummary>,
    pub best_weights: Vec<f64>,
    pub best_fitness: f64,
}

// One scored game: `player` plays `mark` against `opponent`.
#[derive(Debug, Clone, Copy)]
struct Match {
    player: usize,
    opponent: usize,
    mark: Mark,
    seed: u64,
}

pub struct Trainer {
    config: TrainingConfig,
    game: TicTacToe,
    domain: Arc<WeightDomain>,
    rng: StdRng,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let game = TicTacToe::new(&mut rng);
        let domain = Arc::new(config.weights.clone());
        Ok(Self {
            config,
            game,
            domain,
            rng,
        })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn initial_population(&mut self) -> GeneticPopulation<WeightIndividual> {
        (0..self.config.population_size)
            .map(|_| WeightIndividual::random(FEATURE_NAMES.len(), self.domain.clone(), &mut self.rng))
            .collect()
    }

    /// Plays the scoring games and sets every individual's fitness.
    pub fn score(&mut self, population: &mut GeneticPopulation<WeightIndividual>) -> anyhow::Result<()> {
        let n = population.size();
        if n == 0 {
            return Ok(());
        }

        let mut matches = Vec::with_capacity(n * self.config.games_per_individual);
        for player in 0..n {
            for g in 0..self.config.games_per_individual {
                // anyone but itself, unless it is alone
                let opponent = if n == 1 {
                    0
                } else {
                    let o = self.rng.gen_range(0..n - 1);
                    if o >= player {
                        o + 1
                    } else {
                        o
                    }
                };
                let mark = if g % 2 == 0 { Mark::X } else { Mark::O };
                matches.push(Match {
                    player,
                    opponent,
                    mark,
                    seed: self.rng.gen(),
                });
            }
        }

        let weights: Vec<Vec<f64>> = population.iter().map(|i| i.weights()).collect();
        let game = &self.game;
        let config = &self.config;
        let run = |m: &Match| play_match(game, config, &weights, m);
        let scores: Vec<Result<f64, SearchError>> = if config.parallel {
            matches.par_iter().map(run).collect()
        } else {
            matches.iter().map(run).collect()
        };

        let mut totals = vec![0.0; n];
        let mut counts = vec![0usize; n];
        for (m, score) in matches.iter().zip(scores) {
            totals[m.player] += score?;
            counts[m.player] += 1;
        }
        for (i, individual) in population.iter_mut().enumerate() {
            individual.set_fitness(totals[i] / counts[i].max(1) as f64);
        }
        Ok(())
    }

    pub fn run(&mut self) -> anyhow::Result<TrainingReport> {
        self.run_with(|_| {})
    }

    /// Runs the evolution, calling `on_generation` after each generation is
    /// scored.
    pub fn run_with<F>(&mut self, mut on_generation: F) -> anyhow::Result<TrainingReport>
    where
        F: FnMut(&GenerationSummary),
    {
        let mut reproduction = KeepBestPairwiseReproduction::new(self.config.multiplicator, self.config.keep);
        let mut population = self.initial_population();
        let mut summaries = Vec::with_capacity(self.config.generations);

        for generation in 0..self.config.generations {
            self.score(&mut population)?;

            let best = population
                .fittest()
                .ok_or(GeneticsError::NoPopulation)?;
            let summary = GenerationSummary {
                generation,
                population_size: population.size(),
                best_fitness: best.fitness(),
                mean_fitness: population.mean_fitness(),
                best_weights: best.weights(),
            };
            info!(
                "generation {}: best {:.3} mean {:.3}",
                generation, summary.best_fitness, summary.mean_fitness
            );
            on_generation(&summary);
            summaries.push(summary);

            if generation + 1 == self.config.generations {
                break;
            }
            reproduction.set_population(population);
            population = reproduction.result(&mut self.rng)?;
            population.truncate(self.config.population_size);
        }

        let (best_weights, best_fitness) = summaries
            .last()
            .map(|s| (s.best_weights.clone(), s.best_fitness))
            .unwrap_or_default();
        Ok(TrainingReport {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            generations: summaries,
            best_weights,
            best_fitness,
        })
    }
}

fn search_player(
    game: &TicTacToe,
    search: &SearchConfig,
    weights: &[f64],
    mark: Mark,
) -> Result<SearchPlayer<TicTacToe>, SearchError> {
    let strategy = search.build(game.clone(), Box::new(evaluator(mark, weights)?))?;
    Ok(SearchPlayer::new(&mark.to_string(), strategy))
}

fn play_match(game: &TicTacToe, config: &TrainingConfig, weights: &[Vec<f64>], m: &Match) -> Result<f64, SearchError> {
    let mut own = search_player(game, &config.search, &weights[m.player], m.mark)?;
    let mut other = search_player(game, &config.search, &weights[m.opponent], m.mark.opponent())?;
    let mut rng = StdRng::seed_from_u64(m.seed);

    let record = match m.mark {
        Mark::X => play_game(game, &mut own, &mut other, config.opening_plies, config.max_plies, &mut rng)?,
        Mark::O => play_game(game, &mut other, &mut own, config.opening_plies, config.max_plies, &mut rng)?,
    };
    debug!(
        "{} ({}) vs {}: {:?} in {} plies",
        m.player,
        m.mark,
        m.opponent,
        record.winner,
        record.moves.len()
    );
    Ok(record.score_for(m.mark))
}

/// Writes `report` as JSON into `dir`, named after the current time.
pub fn save_weights(report: &TrainingReport, dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let filename = dir.join(format!("weights_{}.json", Local::now().format("%Y%m%d_%H%M%S")));
    let file = std::fs::File::create(&filename)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(filename)
}
