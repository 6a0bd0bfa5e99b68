//! Compute module - Evolutionary search over binary images.

pub mod evolution;

pub use evolution::{Chromosome, EvolutionEngine, NoopObserver, Observer, Population};
