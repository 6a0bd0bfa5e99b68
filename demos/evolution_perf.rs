//! Quick evolution performance test

use bitvolve::{EvolutionConfig, EvolutionEngine, TargetImage};
use std::time::Instant;

fn disc(side: usize) -> TargetImage {
    let center = (side as f64 - 1.0) / 2.0;
    let radius = side as f64 / 3.0;
    let bits = (0..side * side)
        .map(|i| {
            let (x, y) = ((i % side) as f64, (i / side) as f64);
            u8::from((x - center).hypot(y - center) <= radius)
        })
        .collect();
    TargetImage::new(side, side, bits).unwrap()
}

fn main() {
    println!("=== Evolution Performance Test ===\n");

    // Test different grid sizes
    for side in [10, 20, 30] {
        println!("Grid size: {}x{}", side, side);

        let config = EvolutionConfig {
            gene_count: side * side,
            mutation_prob: 1.0 / (side * side) as f64,
            max_generations: 300,
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut engine = EvolutionEngine::new(config, disc(side)).unwrap();
        let result = engine.run();
        let elapsed = start.elapsed();

        let total_evals = result.stats.total_evaluations;
        let evals_per_sec = total_evals as f64 / elapsed.as_secs_f64();

        println!("  State:          {:?}", result.stats.state);
        println!("  Generations:    {}", result.stats.generations);
        println!("  Evaluations:    {}", total_evals);
        println!("  Elapsed:        {:.2}s", elapsed.as_secs_f64());
        println!("  Evals/sec:      {:.1}", evals_per_sec);
        println!("  Best fitness:   {}", result.stats.best_fitness);
        println!();
    }

    println!("=== Scalability Test (fixed 20x20 grid) ===\n");

    // Test different population sizes
    for population_size in [100, 300, 600, 1200] {
        let config = EvolutionConfig {
            population_size,
            elite_count: (population_size / 30).max(2),
            max_generations: 50,
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut engine = EvolutionEngine::new(config, disc(20)).unwrap();
        let result = engine.run();
        let elapsed = start.elapsed();

        let total_evals = result.stats.total_evaluations;
        let evals_per_sec = total_evals as f64 / elapsed.as_secs_f64();

        println!(
            "Population {}: {} evals in {:.2}s ({:.1} evals/sec, best {})",
            population_size,
            total_evals,
            elapsed.as_secs_f64(),
            evals_per_sec,
            result.stats.best_fitness
        );
    }
}
