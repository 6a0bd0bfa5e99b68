//! Population of chromosomes and the generational operators acting on it.

use super::chromosome::{Chromosome, UNEVALUATED};
use super::fitness::FitnessEvaluator;
use super::genome::GenomeRng;

/// An ordered collection of chromosomes plus the best fitness of every
/// completed generation.
///
/// Order only carries meaning right after [`Population::select`], when
/// chromosomes are ranked best first.
#[derive(Debug, Clone, Default)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
    best_fitness_history: Vec<f64>,
    /// Fitness values reflect the current genes.
    evaluated: bool,
}

impl Population {
    /// Population of `size` random chromosomes.
    pub fn random(size: usize, gene_count: usize, rng: &mut GenomeRng) -> Self {
        Self::from_chromosomes(
            (0..size)
                .map(|_| Chromosome::random(gene_count, rng))
                .collect(),
        )
    }

    /// Population holding the given chromosomes, with an empty history.
    pub fn from_chromosomes(chromosomes: Vec<Chromosome>) -> Self {
        Self {
            chromosomes,
            best_fitness_history: Vec::new(),
            evaluated: false,
        }
    }

    /// Assign a fitness to every chromosome.
    pub fn evaluate_all(&mut self, evaluator: &FitnessEvaluator, target: &[u8]) {
        for chromosome in &mut self.chromosomes {
            chromosome.set_fitness(evaluator.evaluate(chromosome.genes(), target));
        }
        self.evaluated = true;
    }

    /// Elitist truncation: keep the `elite_count` lowest-fitness
    /// chromosomes, ranked best first. Ties keep their previous order.
    pub fn select(&mut self, elite_count: usize) {
        self.chromosomes
            .sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
        self.chromosomes.truncate(elite_count);
    }

    /// Breed the current chromosomes back up to `target_size`.
    ///
    /// Parent pairs are drawn uniformly without replacement within a pair.
    /// With probability `crossover_prob` a pair is spliced at a random cut in
    /// `1..gene_count`; otherwise both parents are cloned unchanged. Pairs
    /// are added until at least `target_size` offspring exist, then the
    /// excess is dropped.
    ///
    /// # Panics
    /// Panics if fewer than two parents are available.
    pub fn crossover(
        &mut self,
        target_size: usize,
        crossover_prob: f64,
        gene_count: usize,
        rng: &mut GenomeRng,
    ) {
        assert!(
            self.chromosomes.len() >= 2,
            "crossover needs at least two parents, population has {}",
            self.chromosomes.len()
        );

        let mut next_gen = Vec::with_capacity(target_size + 1);
        while next_gen.len() < target_size {
            let (i, j) = rng.distinct_pair(self.chromosomes.len());
            let parent1 = &self.chromosomes[i];
            let parent2 = &self.chromosomes[j];
            debug_assert_eq!(parent1.len(), gene_count);

            let spliced = if rng.chance(crossover_prob) {
                rng.cut_point(gene_count)
                    .map(|cut| Chromosome::splice(parent1, parent2, cut))
            } else {
                None
            };
            let (child1, child2) =
                spliced.unwrap_or_else(|| (parent1.clone(), parent2.clone()));
            next_gen.push(child1);
            next_gen.push(child2);
        }
        next_gen.truncate(target_size);

        self.chromosomes = next_gen;
        self.evaluated = false;
    }

    /// Mutate every chromosome in place.
    pub fn mutate_all(&mut self, mutation_prob: f64, rng: &mut GenomeRng) {
        for chromosome in &mut self.chromosomes {
            chromosome.mutate(mutation_prob, rng);
        }
        self.evaluated = false;
    }

    /// Chromosome with the lowest fitness; the first one on ties.
    pub fn best(&self) -> Option<&Chromosome> {
        self.chromosomes
            .iter()
            .min_by(|a, b| a.fitness().total_cmp(&b.fitness()))
    }

    /// Lowest fitness currently carried, or the unevaluated sentinel when
    /// empty.
    pub fn best_fitness(&self) -> f64 {
        self.best().map_or(UNEVALUATED, Chromosome::fitness)
    }

    /// Append the current best fitness to the history and return it.
    pub fn record_best_fitness(&mut self) -> f64 {
        let best = self.best_fitness();
        self.best_fitness_history.push(best);
        best
    }

    /// Mean fitness of the evaluated chromosomes, if any.
    pub fn mean_fitness(&self) -> Option<f64> {
        let evaluated: Vec<f64> = self
            .chromosomes
            .iter()
            .filter(|c| c.is_evaluated())
            .map(Chromosome::fitness)
            .collect();
        if evaluated.is_empty() {
            None
        } else {
            Some(evaluated.iter().sum::<f64>() / evaluated.len() as f64)
        }
    }

    /// Whether every fitness reflects the current genes.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    #[inline]
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    #[inline]
    pub fn best_fitness_history(&self) -> &[f64] {
        &self.best_fitness_history
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluated(genes: Vec<u8>, fitness: f64) -> Chromosome {
        let mut chromosome = Chromosome::from_genes(genes);
        chromosome.set_fitness(fitness);
        chromosome
    }

    #[test]
    fn test_random_population() {
        let mut rng = GenomeRng::new(42);
        let population = Population::random(50, 16, &mut rng);
        assert_eq!(population.len(), 50);
        assert!(population.chromosomes().iter().all(|c| c.len() == 16));
        assert!(!population.is_evaluated());
        assert!(population.best_fitness_history().is_empty());
    }

    #[test]
    fn test_evaluate_all() {
        let mut rng = GenomeRng::new(42);
        let mut population = Population::random(20, 8, &mut rng);
        let target = vec![0u8; 8];
        population.evaluate_all(&FitnessEvaluator::default(), &target);

        assert!(population.is_evaluated());
        for chromosome in population.chromosomes() {
            let ones = chromosome.genes().iter().filter(|&&g| g == 1).count();
            assert_eq!(chromosome.fitness(), ones as f64);
        }
    }

    #[test]
    fn test_select_keeps_smallest() {
        let fitnesses = [5.0, 1.0, 7.0, 3.0, 3.0, 0.0, 9.0];
        let mut population = Population::from_chromosomes(
            fitnesses
                .iter()
                .map(|&f| evaluated(vec![0; 4], f))
                .collect(),
        );

        population.select(4);

        let kept: Vec<f64> = population
            .chromosomes()
            .iter()
            .map(Chromosome::fitness)
            .collect();
        assert_eq!(kept, vec![0.0, 1.0, 3.0, 3.0]);
    }

    #[test]
    fn test_select_is_stable_on_ties() {
        let mut population = Population::from_chromosomes(vec![
            evaluated(vec![1, 1], 1.0),
            evaluated(vec![0, 1], 1.0),
            evaluated(vec![1, 0], 1.0),
        ]);
        population.select(2);
        assert_eq!(population.chromosomes()[0].genes(), &[1, 1]);
        assert_eq!(population.chromosomes()[1].genes(), &[0, 1]);
    }

    #[test]
    fn test_crossover_restores_size() {
        let mut rng = GenomeRng::new(8);
        let mut population = Population::random(10, 12, &mut rng);
        population.evaluate_all(&FitnessEvaluator::default(), &[0; 12]);
        population.select(3);
        assert_eq!(population.len(), 3);

        // Odd target sizes drop the surplus child.
        for target_size in [10, 11, 2, 3] {
            population.crossover(target_size, 0.9, 12, &mut rng);
            assert_eq!(population.len(), target_size);
            assert!(population.chromosomes().iter().all(|c| c.len() == 12));
            assert!(!population.is_evaluated());
        }
    }

    #[test]
    fn test_full_crossover_between_zeros_and_ones() {
        let mut rng = GenomeRng::new(21);
        let mut population = Population::from_chromosomes(vec![
            evaluated(vec![0; 8], 0.0),
            evaluated(vec![1; 8], 8.0),
        ]);

        population.crossover(20, 1.0, 8, &mut rng);

        for pair in population.chromosomes().chunks(2) {
            let cut_a = pair[0].genes().iter().position(|&g| g != pair[0].genes()[0]);
            let cut_b = pair[1].genes().iter().position(|&g| g != pair[1].genes()[0]);
            // Every child switches value exactly once, at the same interior cut.
            assert!(cut_a.is_some());
            assert_eq!(cut_a, cut_b);
            assert!(pair[0].genes().iter().zip(pair[1].genes()).all(|(a, b)| a != b));
            assert!(!pair[0].is_evaluated() && !pair[1].is_evaluated());
        }
    }

    #[test]
    fn test_no_crossover_copies_parents() {
        let mut rng = GenomeRng::new(4);
        let parents = vec![
            evaluated(vec![0, 0, 1, 1], 2.0),
            evaluated(vec![1, 0, 1, 0], 2.0),
            evaluated(vec![1, 1, 1, 1], 4.0),
        ];
        let mut population = Population::from_chromosomes(parents.clone());

        population.crossover(12, 0.0, 4, &mut rng);

        for pair in population.chromosomes().chunks(2) {
            assert!(parents.contains(&pair[0]));
            assert!(parents.contains(&pair[1]));
            // Copies keep the parents' fitness and are distinct parents.
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_single_gene_crossover_copies() {
        let mut rng = GenomeRng::new(9);
        let mut population = Population::from_chromosomes(vec![
            evaluated(vec![0], 0.0),
            evaluated(vec![1], 1.0),
        ]);
        population.crossover(6, 1.0, 1, &mut rng);

        // No interior cut exists, so even certain crossover copies.
        for chromosome in population.chromosomes() {
            assert_eq!(chromosome.fitness(), chromosome.genes()[0] as f64);
        }
    }

    #[test]
    fn test_copies_do_not_alias_parents() {
        let mut rng = GenomeRng::new(4);
        let parents = vec![evaluated(vec![0; 6], 0.0), evaluated(vec![0; 6], 0.0)];
        let mut population = Population::from_chromosomes(parents);
        population.crossover(4, 0.0, 6, &mut rng);

        population.mutate_all(1.0, &mut rng);
        for chromosome in population.chromosomes() {
            assert!(chromosome.genes().iter().all(|&g| g == 1));
        }
    }

    #[test]
    #[should_panic(expected = "at least two parents")]
    fn test_crossover_needs_two_parents() {
        let mut rng = GenomeRng::new(4);
        let mut population = Population::from_chromosomes(vec![evaluated(vec![0; 4], 0.0)]);
        population.crossover(4, 1.0, 4, &mut rng);
    }

    #[test]
    fn test_mutate_all_extremes() {
        let mut rng = GenomeRng::new(6);
        let mut population = Population::random(5, 10, &mut rng);
        let before: Vec<Vec<u8>> = population
            .chromosomes()
            .iter()
            .map(|c| c.genes().to_vec())
            .collect();

        population.mutate_all(0.0, &mut rng);
        for (chromosome, genes) in population.chromosomes().iter().zip(&before) {
            assert_eq!(chromosome.genes(), genes.as_slice());
        }

        population.mutate_all(1.0, &mut rng);
        for (chromosome, genes) in population.chromosomes().iter().zip(&before) {
            assert!(chromosome.genes().iter().zip(genes).all(|(a, b)| a != b));
        }
    }

    #[test]
    fn test_best_and_history() {
        let mut population = Population::from_chromosomes(vec![
            evaluated(vec![1, 1], 2.0),
            evaluated(vec![0, 1], 1.0),
            Chromosome::from_genes(vec![0, 0]),
        ]);
        assert_eq!(population.best().map(Chromosome::genes), Some(&[0, 1][..]));
        assert_eq!(population.record_best_fitness(), 1.0);
        assert_eq!(population.best_fitness_history(), &[1.0]);
        assert_eq!(population.mean_fitness(), Some(1.5));

        let empty = Population::default();
        assert!(empty.best().is_none());
        assert_eq!(empty.best_fitness(), UNEVALUATED);
        assert_eq!(empty.mean_fitness(), None);
    }
}
