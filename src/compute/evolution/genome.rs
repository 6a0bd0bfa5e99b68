//! Random source for genome operations.
//!
//! Every stochastic operator draws from a [`GenomeRng`], so a run is fully
//! reproducible from its seed.

use rand::prelude::*;
use rand::seq::index;
use rand_distr::Bernoulli;

/// Random number generator wrapper for genome operations.
pub struct GenomeRng {
    rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw `gene_count` genes uniformly from {0, 1}.
    pub fn random_genes(&mut self, gene_count: usize) -> Vec<u8> {
        (0..gene_count)
            .map(|_| u8::from(self.rng.r#gen::<bool>()))
            .collect()
    }

    /// Flip each gene independently with probability `prob`.
    ///
    /// # Panics
    /// Panics if `prob` is outside `[0, 1]`.
    pub fn flip_bits(&mut self, genes: &mut [u8], prob: f64) {
        let flip = Bernoulli::new(prob)
            .unwrap_or_else(|_| panic!("mutation probability {prob} outside [0, 1]"));
        for gene in genes {
            if self.rng.sample(flip) {
                *gene ^= 1;
            }
        }
    }

    /// Returns `true` with probability `prob`.
    pub fn chance(&mut self, prob: f64) -> bool {
        self.rng.gen_bool(prob)
    }

    /// Two distinct indices drawn uniformly from `0..len`.
    ///
    /// # Panics
    /// Panics if `len < 2`.
    pub fn distinct_pair(&mut self, len: usize) -> (usize, usize) {
        let picked = index::sample(&mut self.rng, len, 2);
        (picked.index(0), picked.index(1))
    }

    /// Crossover cut drawn uniformly from `1..=gene_count - 1`, or `None`
    /// when the genome has no interior position to cut at.
    pub fn cut_point(&mut self, gene_count: usize) -> Option<usize> {
        (gene_count >= 2).then(|| self.rng.gen_range(1..gene_count))
    }
}

/// Number of positions at which two genomes differ.
pub fn genome_distance(g1: &[u8], g2: &[u8]) -> usize {
    g1.iter().zip(g2).filter(|(a, b)| a != b).count()
}
