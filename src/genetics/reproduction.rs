//! Generation step of the genetic engine
//!
//! A [`ReproductionMethod`] is handed the scored population of one generation
//! and produces the next one. [`KeepBestPairwiseReproduction`] combines
//! elitism (the fittest individuals are carried over) with pairwise
//! single-point crossover of the rest.

use super::individual::GeneticIndividual;
use super::population::GeneticPopulation;
use crate::error::GeneticsError;
use log::debug;
use rand::Rng;

pub trait ReproductionMethod<I: GeneticIndividual> {
    /// Sets the scored population the next generation is bred from.
    fn set_population(&mut self, population: GeneticPopulation<I>);

    /// Breeds the next generation, consuming the population that was set.
    fn result<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<GeneticPopulation<I>, GeneticsError>;

    /// Number of individuals `result` will return for the current population.
    fn result_size(&self) -> usize;
}

/// Elitism plus pairwise crossover.
///
/// For a population of `n` individuals the next generation holds
/// `keep + n % 2 + (n - n % 2) * multiplicator / 2` individuals:
///
/// 1. the `keep` fittest are copied over and their fitness reset to 0,
/// 2. for an odd `n` the fittest remaining individual is removed, mutated
///    and added, leaving an even breeding pool,
/// 3. the pool produces `pool * multiplicator / 2` mutated offspring, each
///    with one parent walking the pool in order and a partner drawn at random.
#[derive(Debug, Clone)]
pub struct KeepBestPairwiseReproduction<I> {
    population: Option<GeneticPopulation<I>>,
    multiplicator: usize,
    keep: usize,
}

impl<I: GeneticIndividual> KeepBestPairwiseReproduction<I> {
    pub fn new(multiplicator: usize, keep: usize) -> Self {
        Self {
            population: None,
            multiplicator,
            keep,
        }
    }

    pub fn multiplicator(&self) -> usize {
        self.multiplicator
    }

    pub fn keep(&self) -> usize {
        self.keep
    }
}

impl<I: GeneticIndividual> ReproductionMethod<I> for KeepBestPairwiseReproduction<I> {
    fn set_population(&mut self, population: GeneticPopulation<I>) {
        self.population = Some(population);
    }

    fn result_size(&self) -> usize {
        let Some(population) = &self.population else {
            return 0;
        };
        let n = population.size();
        if n == 0 {
            return 0;
        }
        self.keep + n % 2 + (n - n % 2) * self.multiplicator / 2
    }

    fn result<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<GeneticPopulation<I>, GeneticsError> {
        let expected = self.result_size();
        let mut pop = self.population.take().ok_or(GeneticsError::NoPopulation)?;
        let mut next = GeneticPopulation::with_capacity(expected);
        if pop.is_empty() {
            return Ok(next);
        }

        // Elites stay in the pool with fitness 0, so the next pick moves on.
        for _ in 0..self.keep {
            let Some(best) = pop.fittest_index() else {
                break;
            };
            pop[best].set_fitness(0.0);
            next.add(pop[best].clone());
        }

        if pop.size() % 2 != 0 {
            if let Some(best) = pop.fittest_index() {
                if let Some(mut max) = pop.remove(best) {
                    max.mutate(rng);
                    max.set_fitness(0.0);
                    next.add(max);
                }
            }
        }

        let pool = pop.size();
        let offspring = pool * self.multiplicator / 2;
        for k in 0..offspring {
            let partner = rng.gen_range(0..pool);
            let mut child = pop[k % pool].reproduce_with(&pop[partner], rng)?;
            child.mutate(rng);
            next.add(child);
        }

        debug!(
            "bred {} individuals ({} kept, {} offspring) from a population of {}",
            next.size(),
            self.keep,
            offspring,
            pool + pool % 2
        );
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::weights::{WeightDomain, WeightIndividual};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn population(n: usize, rng: &mut StdRng) -> GeneticPopulation<WeightIndividual> {
        let domain = Arc::new(WeightDomain::default());
        (0..n)
            .map(|i| {
                let mut individual = WeightIndividual::random(4, domain.clone(), rng);
                individual.set_fitness(i as f64 / (n as f64 + 1.0));
                individual
            })
            .collect()
    }

    #[test]
    fn test_result_size_law() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [0, 1, 2, 5, 10] {
            for m in [1, 2] {
                for k in [0, 1, 3] {
                    let mut method = KeepBestPairwiseReproduction::new(m, k);
                    method.set_population(population(n, &mut rng));
                    let expected = if n == 0 {
                        0
                    } else {
                        k + n % 2 + (n - n % 2) * m / 2
                    };
                    assert_eq!(method.result_size(), expected, "n={} m={} k={}", n, m, k);
                    let next = method.result(&mut rng).unwrap();
                    assert_eq!(next.size(), expected, "n={} m={} k={}", n, m, k);
                }
            }
        }
    }

    #[test]
    fn test_elites_are_copied_with_reset_fitness() {
        let mut rng = StdRng::seed_from_u64(1);
        let pop = population(4, &mut rng);
        let best = pop.fittest().unwrap().clone();

        let mut method = KeepBestPairwiseReproduction::new(2, 1);
        method.set_population(pop);
        let next = method.result(&mut rng).unwrap();

        assert!(next[0].equals_genetic(&best));
        assert!(next.iter().all(|i| i.fitness() == 0.0));
    }

    #[test]
    fn test_two_elites_are_distinct() {
        let mut rng = StdRng::seed_from_u64(2);
        let pop = population(6, &mut rng);
        let first = pop[5].clone();
        let second = pop[4].clone();

        let mut method = KeepBestPairwiseReproduction::new(1, 2);
        method.set_population(pop);
        let next = method.result(&mut rng).unwrap();

        assert!(next[0].equals_genetic(&first));
        assert!(next[1].equals_genetic(&second));
    }

    #[test]
    fn test_odd_leftover_and_parentage() {
        let mut rng = StdRng::seed_from_u64(4);
        // zero step: mutation leaves genes unchanged
        let domain = Arc::new(WeightDomain {
            step: 0.0,
            ..WeightDomain::default()
        });
        let pop: GeneticPopulation<WeightIndividual> = (0..5)
            .map(|i| {
                let mut individual = WeightIndividual::random(4, domain.clone(), &mut rng);
                individual.set_fitness(0.1 * (i + 1) as f64);
                individual
            })
            .collect();
        let elite = pop[4].clone();
        let runner_up = pop[3].clone();
        // the runner-up leaves the pool; the elite stays in it
        let pool = [pop[0].clone(), pop[1].clone(), pop[2].clone(), pop[4].clone()];

        let mut method = KeepBestPairwiseReproduction::new(2, 1);
        method.set_population(pop);
        let next = method.result(&mut rng).unwrap();

        assert_eq!(next.size(), 1 + 1 + 4);
        assert!(next[0].equals_genetic(&elite));
        assert!(next[1].equals_genetic(&runner_up));
        assert_eq!(next[1].fitness(), 0.0);

        for (k, child) in next.iter().skip(2).enumerate() {
            let first = pool[k % pool.len()].weights();
            let genes = child.weights();
            assert_eq!(genes[0], first[0], "child {}", k);
            // the rest comes from a partner drawn from the pool
            for (g, gene) in genes.iter().enumerate() {
                assert!(pool.iter().any(|p| p.weights()[g] == *gene), "child {} gene {}", k, g);
            }
        }
    }

    #[test]
    fn test_result_without_population_fails() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut method: KeepBestPairwiseReproduction<WeightIndividual> =
            KeepBestPairwiseReproduction::new(2, 1);
        assert_eq!(method.result_size(), 0);
        assert_eq!(method.result(&mut rng).unwrap_err(), GeneticsError::NoPopulation);

        // the population is consumed by a successful call
        method.set_population(population(2, &mut rng));
        assert!(method.result(&mut rng).is_ok());
        assert!(method.result(&mut rng).is_err());
    }

    #[test]
    fn test_same_seed_same_generation() {
        let run = || {
            let mut rng = StdRng::seed_from_u64(99);
            let mut method = KeepBestPairwiseReproduction::new(2, 1);
            method.set_population(population(7, &mut rng));
            let next = method.result(&mut rng).unwrap();
            next.iter().map(|i| i.weights()).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
