//! Evaluation weights as genes
//!
//! A [`WeightIndividual`] is a vector of real-valued weights, one per feature
//! of a [`LinearEvaluator`]. Evolving the population tunes the evaluator.

use super::genotype::{Gene, Genotype};
use super::individual::GeneticIndividual;
use crate::error::{GeneticsError, SearchError};
use crate::search::weighted::{Feature, LinearEvaluator};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight(pub f64);

/// Range and mutation behavior shared by all weights of a genotype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightDomain {
    pub min: f64,
    pub max: f64,
    /// Largest change a single mutation applies to a weight.
    pub step: f64,
    /// Chance that each further gene mutates besides the one always picked.
    pub mutation_rate: f64,
}

impl Default for WeightDomain {
    fn default() -> Self {
        WeightDomain {
            min: -2.0,
            max: 2.0,
            step: 0.25,
            mutation_rate: 0.1,
        }
    }
}

impl WeightDomain {
    pub fn validate(&self) -> Result<(), GeneticsError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(GeneticsError::InvalidDomain {
                message: format!("bad range [{}, {}]", self.min, self.max),
            });
        }
        if !self.step.is_finite() || self.step < 0.0 {
            return Err(GeneticsError::InvalidDomain {
                message: format!("bad step {}", self.step),
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GeneticsError::InvalidDomain {
                message: format!("mutation rate {} outside [0, 1]", self.mutation_rate),
            });
        }
        Ok(())
    }
}

impl Gene for Weight {
    type Domain = WeightDomain;

    fn random<R: Rng + ?Sized>(domain: &WeightDomain, rng: &mut R) -> Self {
        Weight(rng.gen_range(domain.min..=domain.max))
    }

    fn mutated<R: Rng + ?Sized>(&self, domain: &WeightDomain, rng: &mut R) -> Self {
        let delta = rng.gen_range(-domain.step..=domain.step);
        Weight((self.0 + delta).clamp(domain.min, domain.max))
    }

    fn in_domain(&self, domain: &WeightDomain) -> bool {
        self.0 >= domain.min && self.0 <= domain.max
    }
}

#[derive(Debug, Clone)]
pub struct WeightIndividual {
    genotype: Genotype<Weight>,
    fitness: f64,
}

impl WeightIndividual {
    pub fn random<R: Rng + ?Sized>(len: usize, domain: Arc<WeightDomain>, rng: &mut R) -> Self {
        Self::from_genotype(Genotype::random(len, domain, rng))
    }

    pub fn from_weights(weights: &[f64], domain: Arc<WeightDomain>) -> Result<Self, GeneticsError> {
        let genes = weights.iter().map(|&w| Weight(w)).collect();
        Ok(Self::from_genotype(Genotype::new(genes, domain)?))
    }

    pub fn weights(&self) -> Vec<f64> {
        self.genotype.genes().iter().map(|w| w.0).collect()
    }

    /// The linear evaluator these weights parameterize.
    pub fn evaluator<S>(&self, name: &str, features: Vec<Feature<S>>) -> Result<LinearEvaluator<S>, SearchError> {
        LinearEvaluator::new(name, features, self.weights())
    }
}

impl GeneticIndividual for WeightIndividual {
    type Gene = Weight;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    fn genotype(&self) -> &Genotype<Weight> {
        &self.genotype
    }

    fn from_genotype(genotype: Genotype<Weight>) -> Self {
        Self {
            genotype,
            fitness: 0.0,
        }
    }

    fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let len = self.genotype.len();
        if len == 0 {
            return;
        }
        let rate = self.genotype.domain().mutation_rate;
        let forced = rng.gen_range(0..len);
        for i in 0..len {
            if i == forced || rng.gen_bool(rate) {
                self.genotype.mutate_gene(i, rng);
            }
        }
    }
}
