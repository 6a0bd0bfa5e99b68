//! Benchmarks for the generation cycle.

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};

use bitvolve::{
    EvolutionEngine,
    compute::evolution::{FitnessEvaluator, GenomeRng, Population},
    schema::{EvolutionConfig, TargetImage},
};

fn checkerboard(width: usize, height: usize) -> TargetImage {
    let bits = (0..width * height)
        .map(|i| ((i % width + i / width) % 2) as u8)
        .collect();
    TargetImage::new(width, height, bits).unwrap()
}

fn bench_generation_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation_step");

    for population_size in [100, 300, 600, 1200] {
        let config = EvolutionConfig {
            population_size,
            elite_count: population_size / 30,
            max_generations: 1_000,
            random_seed: Some(42),
            ..Default::default()
        };
        let target = checkerboard(20, 20);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("pop_{}", population_size)),
            &population_size,
            |b, _| {
                b.iter_batched(
                    || EvolutionEngine::new(config.clone(), target.clone()).unwrap(),
                    |mut engine| black_box(engine.step()),
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_all");
    let evaluator = FitnessEvaluator::default();

    for side in [10, 20, 40] {
        let target = checkerboard(side, side);
        let mut rng = GenomeRng::new(7);
        let mut population = Population::random(600, target.len(), &mut rng);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", side, side)),
            &side,
            |b, _| {
                b.iter(|| {
                    population.evaluate_all(&evaluator, black_box(target.bits()));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_generation_step, bench_evaluation);
criterion_main!(benches);
