use super::genotype::{Gene, Genotype};
use crate::error::GeneticsError;
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;

/// A member of a population: a genotype plus a fitness score.
///
/// Fitness is conventionally in `[0, 1]` and only meaningful within one
/// generation.
pub trait GeneticIndividual: Clone + fmt::Debug {
    type Gene: Gene;

    fn fitness(&self) -> f64;

    fn set_fitness(&mut self, fitness: f64);

    fn genotype(&self) -> &Genotype<Self::Gene>;

    /// A new individual with fitness 0.
    fn from_genotype(genotype: Genotype<Self::Gene>) -> Self;

    /// Perturbs one or more genes in place, within their domain.
    fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R);

    fn equals_genetic(&self, other: &Self) -> bool {
        self.genotype() == other.genotype()
    }

    fn compare_fitness(&self, other: &Self) -> Ordering {
        self.fitness().total_cmp(&other.fitness())
    }

    /// Offspring with genes `[0, cut)` from `self` and the rest from `other`.
    fn reproduce_at(&self, other: &Self, cut: usize) -> Result<Self, GeneticsError> {
        let genotype = self.genotype().crossover(other.genotype(), cut)?;
        Ok(Self::from_genotype(genotype))
    }

    /// Offspring of a crossover at a random cut point. With two or more
    /// genes the cut is interior, so both parents contribute.
    fn reproduce_with<R: Rng + ?Sized>(&self, other: &Self, rng: &mut R) -> Result<Self, GeneticsError> {
        let len = self.genotype().len();
        let cut = if len >= 2 {
            rng.gen_range(1..len)
        } else {
            rng.gen_range(0..=len)
        };
        self.reproduce_at(other, cut)
    }
}
