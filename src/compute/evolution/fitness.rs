//! Fitness evaluation against a binary target.

use crate::schema::FitnessType;

/// Scores gene vectors against a target. Pure: the score depends only on
/// the genes and the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct FitnessEvaluator {
    fitness_type: FitnessType,
}

impl FitnessEvaluator {
    /// Create a new fitness evaluator.
    pub fn new(fitness_type: FitnessType) -> Self {
        Self { fitness_type }
    }

    pub fn fitness_type(&self) -> FitnessType {
        self.fitness_type
    }

    /// Cost of `genes` relative to `target`. Lower is better; 0 is an
    /// exact match.
    ///
    /// # Panics
    /// Panics if `genes` and `target` differ in length. Chromosomes and
    /// target are validated to the same length before a run starts, so a
    /// mismatch here is a bug in the caller.
    pub fn evaluate(&self, genes: &[u8], target: &[u8]) -> f64 {
        assert_eq!(
            genes.len(),
            target.len(),
            "genome length {} does not match target length {}",
            genes.len(),
            target.len()
        );

        match self.fitness_type {
            FitnessType::Min => squared_error(genes, target),
        }
    }
}

/// Sum of squared per-position differences. For 0/1 vectors this is the
/// Hamming distance.
pub fn squared_error(genes: &[u8], target: &[u8]) -> f64 {
    genes
        .iter()
        .zip(target)
        .map(|(&g, &t)| {
            let diff = f64::from(g) - f64::from(t);
            diff * diff
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_match_is_zero() {
        let evaluator = FitnessEvaluator::default();
        let target = [0, 1, 1, 0, 1, 0, 0, 1];
        assert_eq!(evaluator.evaluate(&target, &target), 0.0);
    }

    #[test]
    fn test_all_bits_wrong() {
        let evaluator = FitnessEvaluator::default();
        let target = vec![0u8; 16];
        let genes = vec![1u8; 16];
        assert_eq!(evaluator.evaluate(&genes, &target), 16.0);
    }

    #[test]
    fn test_counts_mismatches() {
        let evaluator = FitnessEvaluator::new(FitnessType::Min);
        assert_eq!(evaluator.evaluate(&[1, 0, 1, 1], &[1, 1, 1, 0]), 2.0);
    }

    #[test]
    #[should_panic(expected = "does not match target length")]
    fn test_length_mismatch_panics() {
        let evaluator = FitnessEvaluator::default();
        evaluator.evaluate(&[0, 1, 0], &[0, 1]);
    }
}
