//! Bitvolve - Genetic algorithm that evolves binary images.
//!
//! This crate evolves a population of fixed-length 0/1 chromosomes toward a
//! thresholded target image using elitist truncation selection, single-point
//! crossover and per-gene bit-flip mutation. Fitness is the squared error
//! against the target, so a perfect reproduction scores 0.
//!
//! # Architecture
//!
//! The crate is split into four modules:
//!
//! - `schema`: Configuration, target image and result types
//! - `compute`: The evolutionary search (chromosomes, population, engine)
//! - `imaging`: Netpbm loading, binarisation and terminal rendering
//! - `run`: Config files, target loading and result export for the CLI
//!
//! # Example
//!
//! ```rust,no_run
//! use bitvolve::{
//!     compute::EvolutionEngine,
//!     imaging::{ImageSource, NetpbmSource, TerminalRenderer},
//!     schema::EvolutionConfig,
//! };
//!
//! // Load a 20x20 binary target
//! let target = NetpbmSource::new("target.pgm", 20, 20, 128).load().unwrap();
//!
//! // Evolve it, drawing the best chromosome every 10 generations
//! let mut engine = EvolutionEngine::new(EvolutionConfig::default(), target).unwrap();
//! let result = engine.run_with_observer(&mut TerminalRenderer::stdout(10));
//!
//! println!("Best fitness after {} generations: {}", result.stats.generations, result.stats.best_fitness);
//! ```

pub mod compute;
pub mod imaging;
pub mod run;
pub mod schema;

// Re-export commonly used types
pub use compute::{Chromosome, EvolutionEngine, Observer};
pub use schema::{EvolutionConfig, EvolutionResult, RunConfig, TargetImage};
