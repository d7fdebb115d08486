pub mod config;
pub mod game;
pub mod trainer;

pub use config::TrainingConfig;
pub use game::{play_game, GameRecord};
pub use trainer::{save_weights, GenerationSummary, Trainer, TrainingReport};
