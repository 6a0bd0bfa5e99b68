//! Evolutionary search module for evolving binary images.
//!
//! # Overview
//!
//! The evolutionary search system consists of:
//!
//! - **Chromosomes** (`chromosome`): Fixed-length 0/1 gene vectors with a fitness
//! - **Fitness** (`fitness`): Squared-error cost against the target
//! - **Genome Operations** (`genome`): Seeded randomness, crossover cuts, bit flips
//! - **Population** (`population`): Elitist selection, crossover and mutation
//! - **Search** (`search`): The generation loop and its termination policy
//! - **Observers** (`observer`): Per-generation hook for visualization
//!
//! # Example
//!
//! ```rust,no_run
//! use bitvolve::compute::evolution::{Chromosome, EvolutionEngine};
//! use bitvolve::schema::{EvolutionConfig, TargetImage};
//!
//! let target = TargetImage::filled(4, 4, 0).unwrap();
//! let config = EvolutionConfig {
//!     gene_count: 16,
//!     population_size: 50,
//!     elite_count: 4,
//!     mutation_prob: 0.02,
//!     max_generations: 500,
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut engine = EvolutionEngine::new(config, target).unwrap();
//! let result = engine.run_with_observer(&mut |best: &Chromosome, _: &TargetImage| {
//!     println!("best fitness = {}", best.fitness());
//! });
//!
//! println!("{:?} after {} generations", result.stats.state, result.stats.generations);
//! ```
//!
//! # Generation Cycle
//!
//! Each generation evaluates the population (unless its fitness is already
//! current), keeps the `elite_count` best chromosomes, breeds them back to
//! `population_size` by single-point crossover, mutates every gene with
//! `mutation_prob`, reports the best chromosome and checks for convergence
//! (best fitness 0) or the generation cap.

mod chromosome;
mod fitness;
mod genome;
mod observer;
mod population;
mod search;

pub use chromosome::{Chromosome, UNEVALUATED};
pub use fitness::{FitnessEvaluator, squared_error};
pub use genome::{GenomeRng, genome_distance};
pub use observer::{NoopObserver, Observer};
pub use population::Population;
pub use search::EvolutionEngine;
