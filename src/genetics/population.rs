use super::individual::GeneticIndividual;
use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

/// Insertion-ordered collection of individuals.
#[derive(Debug, Clone)]
pub struct GeneticPopulation<I> {
    individuals: Vec<I>,
}

impl<I> Default for GeneticPopulation<I> {
    fn default() -> Self {
        Self {
            individuals: Vec::new(),
        }
    }
}

impl<I> From<Vec<I>> for GeneticPopulation<I> {
    fn from(individuals: Vec<I>) -> Self {
        Self { individuals }
    }
}

impl<I> FromIterator<I> for GeneticPopulation<I> {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self {
            individuals: iter.into_iter().collect(),
        }
    }
}

impl<I> GeneticPopulation<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, individual: I) {
        self.individuals.push(individual);
    }

    /// Removes the individual at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<I> {
        if index < self.individuals.len() {
            Some(self.individuals.remove(index))
        } else {
            None
        }
    }

    /// Drops everything past the first `len` individuals.
    pub fn truncate(&mut self, len: usize) {
        self.individuals.truncate(len);
    }

    pub fn get(&self, index: usize) -> Option<&I> {
        self.individuals.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut I> {
        self.individuals.get_mut(index)
    }

    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, I> {
        self.individuals.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, I> {
        self.individuals.iter_mut()
    }

    pub fn as_slice(&self) -> &[I] {
        &self.individuals
    }

    pub fn into_vec(self) -> Vec<I> {
        self.individuals
    }
}

impl<I: GeneticIndividual> GeneticPopulation<I> {
    /// Index of the highest fitness; the earliest inserted wins ties.
    pub fn fittest_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, individual) in self.individuals.iter().enumerate() {
            let better = match best {
                None => true,
                Some(b) => individual.compare_fitness(&self.individuals[b]) == Ordering::Greater,
            };
            if better {
                best = Some(i);
            }
        }
        best
    }

    pub fn fittest(&self) -> Option<&I> {
        self.fittest_index().map(|i| &self.individuals[i])
    }

    pub fn mean_fitness(&self) -> f64 {
        if self.individuals.is_empty() {
            return 0.0;
        }
        self.individuals.iter().map(|i| i.fitness()).sum::<f64>() / self.individuals.len() as f64
    }
}

impl<I> Index<usize> for GeneticPopulation<I> {
    type Output = I;

    fn index(&self, index: usize) -> &I {
        &self.individuals[index]
    }
}

impl<I> IndexMut<usize> for GeneticPopulation<I> {
    fn index_mut(&mut self, index: usize) -> &mut I {
        &mut self.individuals[index]
    }
}

impl<I> IntoIterator for GeneticPopulation<I> {
    type Item = I;
    type IntoIter = std::vec::IntoIter<I>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.into_iter()
    }
}
