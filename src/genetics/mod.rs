pub mod genotype;
pub mod individual;
pub mod population;
pub mod reproduction;
pub mod weights;

pub use genotype::{Gene, Genotype};
pub use individual::GeneticIndividual;
pub use population::GeneticPopulation;
pub use reproduction::{KeepBestPairwiseReproduction, ReproductionMethod};
pub use weights::{Weight, WeightDomain, WeightIndividual};
