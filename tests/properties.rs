//! Property tests for the genetic operators.

use bitvolve::compute::evolution::{
    Chromosome, FitnessEvaluator, GenomeRng, Population, genome_distance,
};
use bitvolve::imaging::{decode_netpbm, encode_pbm, threshold};
use proptest::prelude::*;

fn genes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..=1, 1..=max_len)
}

proptest! {
    #[test]
    fn test_random_chromosome_is_binary(gene_count in 1usize..500, seed in any::<u64>()) {
        let mut rng = GenomeRng::new(seed);
        let chromosome = Chromosome::random(gene_count, &mut rng);
        prop_assert_eq!(chromosome.len(), gene_count);
        prop_assert!(chromosome.genes().iter().all(|&g| g <= 1));
        prop_assert!(!chromosome.is_evaluated());
    }

    #[test]
    fn test_fitness_self_and_complement(target in genes(400)) {
        let evaluator = FitnessEvaluator::default();
        let complement: Vec<u8> = target.iter().map(|&g| 1 - g).collect();
        prop_assert_eq!(evaluator.evaluate(&target, &target), 0.0);
        prop_assert_eq!(evaluator.evaluate(&complement, &target), target.len() as f64);
    }

    #[test]
    fn test_fitness_is_hamming_distance(pair in (1usize..200).prop_flat_map(|n| {
        (prop::collection::vec(0u8..=1, n), prop::collection::vec(0u8..=1, n))
    })) {
        let (a, b) = pair;
        let fitness = FitnessEvaluator::default().evaluate(&a, &b);
        prop_assert_eq!(fitness, genome_distance(&a, &b) as f64);
    }

    #[test]
    fn test_splice_zeros_and_ones(n in 1usize..100, cut_frac in 0.0f64..=1.0) {
        let cut = ((n as f64) * cut_frac) as usize;
        let zeros = Chromosome::from_genes(vec![0; n]);
        let ones = Chromosome::from_genes(vec![1; n]);
        let (a, b) = Chromosome::splice(&zeros, &ones, cut);

        prop_assert!(a.genes()[..cut].iter().all(|&g| g == 0));
        prop_assert!(a.genes()[cut..].iter().all(|&g| g == 1));
        prop_assert!(b.genes()[..cut].iter().all(|&g| g == 1));
        prop_assert!(b.genes()[cut..].iter().all(|&g| g == 0));
    }

    #[test]
    fn test_select_keeps_smallest(
        fitnesses in prop::collection::vec(0u32..1000, 2..80),
        keep_frac in 0.0f64..=1.0,
    ) {
        let elite_count = 2 + ((fitnesses.len() - 2) as f64 * keep_frac) as usize;
        let mut population = Population::from_chromosomes(
            fitnesses
                .iter()
                .map(|&f| {
                    let mut c = Chromosome::from_genes(vec![0; 3]);
                    c.set_fitness(f as f64);
                    c
                })
                .collect(),
        );
        population.select(elite_count);

        let mut expected: Vec<f64> = fitnesses.iter().map(|&f| f as f64).collect();
        expected.sort_by(f64::total_cmp);
        expected.truncate(elite_count);
        let kept: Vec<f64> = population.chromosomes().iter().map(Chromosome::fitness).collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn test_crossover_restores_size(
        parents in 2usize..20,
        target_size in 2usize..200,
        gene_count in 1usize..64,
        crossover_prob in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let mut rng = GenomeRng::new(seed);
        let mut population = Population::random(parents, gene_count, &mut rng);
        population.crossover(target_size, crossover_prob, gene_count, &mut rng);

        prop_assert_eq!(population.len(), target_size);
        prop_assert!(population.chromosomes().iter().all(|c| c.len() == gene_count));
    }

    #[test]
    fn test_mutate_extremes(original in genes(300), seed in any::<u64>()) {
        let mut rng = GenomeRng::new(seed);
        let mut chromosome = Chromosome::from_genes(original.clone());

        chromosome.mutate(0.0, &mut rng);
        prop_assert_eq!(chromosome.genes(), original.as_slice());

        chromosome.mutate(1.0, &mut rng);
        prop_assert_eq!(genome_distance(chromosome.genes(), &original), original.len());
    }

    #[test]
    fn test_pbm_preserves_bits(width in 1usize..40, height in 1usize..10, seed in any::<u64>()) {
        let mut rng = GenomeRng::new(seed);
        let bits = rng.random_genes(width * height);
        let image = decode_netpbm(&encode_pbm(width, height, &bits)).unwrap();
        prop_assert_eq!(threshold(&image, 128), bits);
    }
}
