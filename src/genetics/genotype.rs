//! Fixed-length gene sequences
//!
//! Every genotype carries a shared, immutable description of the values its
//! genes may take. Crossover and sub-sequencing keep that domain, and
//! crossover keeps the length.

use crate::error::GeneticsError;
use rand::Rng;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// A single gene and the rules for drawing and perturbing it.
pub trait Gene: Clone + PartialEq + fmt::Debug {
    type Domain: fmt::Debug;

    /// A fresh gene drawn from the domain.
    fn random<R: Rng + ?Sized>(domain: &Self::Domain, rng: &mut R) -> Self;

    /// A perturbed copy that still lies in the domain.
    fn mutated<R: Rng + ?Sized>(&self, domain: &Self::Domain, rng: &mut R) -> Self;

    fn in_domain(&self, domain: &Self::Domain) -> bool;
}

pub struct Genotype<G: Gene> {
    genes: Vec<G>,
    domain: Arc<G::Domain>,
}

impl<G: Gene> Genotype<G> {
    pub fn new(genes: Vec<G>, domain: Arc<G::Domain>) -> Result<Self, GeneticsError> {
        if let Some(index) = genes.iter().position(|g| !g.in_domain(&domain)) {
            return Err(GeneticsError::GeneOutOfDomain { index });
        }
        Ok(Self { genes, domain })
    }

    pub fn random<R: Rng + ?Sized>(len: usize, domain: Arc<G::Domain>, rng: &mut R) -> Self {
        let genes = (0..len).map(|_| G::random(&domain, rng)).collect();
        Self { genes, domain }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    pub fn get(&self, index: usize) -> Option<&G> {
        self.genes.get(index)
    }

    pub fn domain(&self) -> &Arc<G::Domain> {
        &self.domain
    }

    /// The genes in `range`, sharing this genotype's domain.
    pub fn sub_sequence(&self, range: Range<usize>) -> Result<Self, GeneticsError> {
        if range.start > range.end || range.end > self.len() {
            return Err(GeneticsError::CutPointOutOfRange {
                cut: range.end.max(range.start),
                len: self.len(),
            });
        }
        Ok(Self {
            genes: self.genes[range].to_vec(),
            domain: Arc::clone(&self.domain),
        })
    }

    /// Genes `[0, cut)` from `self` followed by genes `[cut, len)` from `other`.
    pub fn crossover(&self, other: &Self, cut: usize) -> Result<Self, GeneticsError> {
        if self.len() != other.len() {
            return Err(GeneticsError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        let mut child = self.sub_sequence(0..cut)?;
        child
            .genes
            .extend_from_slice(other.sub_sequence(cut..other.len())?.genes());
        Ok(child)
    }

    /// Replaces gene `index` by a perturbed copy.
    pub fn mutate_gene<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) {
        if let Some(gene) = self.genes.get(index) {
            let next = gene.mutated(&self.domain, rng);
            self.genes[index] = next;
        }
    }
}

impl<G: Gene> Clone for Genotype<G> {
    fn clone(&self) -> Self {
        Self {
            genes: self.genes.clone(),
            domain: Arc::clone(&self.domain),
        }
    }
}

impl<G: Gene> PartialEq for Genotype<G> {
    fn eq(&self, other: &Self) -> bool {
        self.genes == other.genes
    }
}

impl<G: Gene> fmt::Debug for Genotype<G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(&self.genes).finish()
    }
}
