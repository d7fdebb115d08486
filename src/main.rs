//! Evolves tic-tac-toe evaluation weights by self-play.
//!
//! Usage: reason-train [config.json]

use reason_engine::selfplay::{save_weights, Trainer, TrainingConfig};
use reason_engine::tictactoe::FEATURE_NAMES;
use std::env;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = match args.get(1) {
        Some(path) => TrainingConfig::load(path)?,
        None => TrainingConfig::default(),
    };

    println!("=== Weight Training ===");
    println!(
        "population {} / generations {} / depth {} / {} games each",
        config.population_size,
        config.generations,
        config.search.depth_limit,
        config.games_per_individual
    );

    let output_dir = config.output_dir.clone();
    let total = config.generations;
    let mut trainer = Trainer::new(config)?;
    let start = Instant::now();

    let report = trainer.run_with(|summary| {
        println!(
            "Generation {}/{}: best {:.3}, mean {:.3} ({} individuals, {:.1}s)",
            summary.generation + 1,
            total,
            summary.best_fitness,
            summary.mean_fitness,
            summary.population_size,
            start.elapsed().as_secs_f64()
        );
    })?;

    println!();
    println!("--- Best Weights ---");
    for (name, weight) in FEATURE_NAMES.iter().zip(&report.best_weights) {
        println!("{:>12}: {:+.4}", name, weight);
    }

    let path = save_weights(&report, &output_dir)?;
    println!("Saved to {}", path.display());
    Ok(())
}
