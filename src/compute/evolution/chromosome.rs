//! Binary chromosome representation.

use crate::schema::ChromosomeSnapshot;

use super::genome::GenomeRng;

/// Fitness carried by a chromosome that has not been evaluated yet.
/// Worse than any real fitness under minimisation.
pub const UNEVALUATED: f64 = f64::INFINITY;

/// A candidate solution: a fixed-length vector of 0/1 genes plus its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    genes: Vec<u8>,
    fitness: f64,
}

impl Chromosome {
    /// Random chromosome with genes drawn uniformly from {0, 1}.
    pub fn random(gene_count: usize, rng: &mut GenomeRng) -> Self {
        Self::from_genes(rng.random_genes(gene_count))
    }

    /// Unevaluated chromosome holding `genes`.
    pub fn from_genes(genes: Vec<u8>) -> Self {
        debug_assert!(genes.iter().all(|&g| g <= 1), "genes must be 0 or 1");
        Self {
            genes,
            fitness: UNEVALUATED,
        }
    }

    /// Single-point crossover at `cut`.
    ///
    /// The first child takes `parent1`'s genes before the cut and
    /// `parent2`'s from the cut onward; the second child is the mirror.
    /// Both children are unevaluated.
    ///
    /// # Panics
    /// Panics if the parents differ in length or `cut` exceeds it.
    pub fn splice(parent1: &Chromosome, parent2: &Chromosome, cut: usize) -> (Self, Self) {
        assert_eq!(
            parent1.len(),
            parent2.len(),
            "cannot splice chromosomes of different lengths"
        );
        assert!(cut <= parent1.len(), "cut {cut} beyond genome length");

        let (head1, tail1) = parent1.genes.split_at(cut);
        let (head2, tail2) = parent2.genes.split_at(cut);

        (
            Self::from_genes([head1, tail2].concat()),
            Self::from_genes([head2, tail1].concat()),
        )
    }

    /// Flip each gene independently with probability `mutation_prob`.
    ///
    /// Fitness is left untouched; re-evaluate before relying on it.
    pub fn mutate(&mut self, mutation_prob: f64, rng: &mut GenomeRng) {
        rng.flip_bits(&mut self.genes, mutation_prob);
    }

    #[inline]
    pub fn genes(&self) -> &[u8] {
        &self.genes
    }

    #[inline]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    #[inline]
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Whether a fitness has been assigned since creation.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.fitness != UNEVALUATED
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Convert to snapshot for serialization.
    pub fn to_snapshot(&self) -> ChromosomeSnapshot {
        ChromosomeSnapshot {
            genes: self.genes.clone(),
            fitness: self.fitness,
        }
    }
}
