//! Evolution configuration types for binary image evolution.
//!
//! This module provides the parameter bundle that drives the genetic
//! algorithm, plus the result types reported at the end of a run.

use serde::{Deserialize, Serialize};

/// Top-level configuration for an evolutionary run.
///
/// Constructed once before the run and never mutated afterwards; the
/// engine takes it by value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Number of genes per chromosome. Must equal the target length.
    #[serde(default = "default_gene_count")]
    pub gene_count: usize,
    /// Per-gene bit-flip probability (0.0-1.0).
    #[serde(default = "default_mutation_prob")]
    pub mutation_prob: f64,
    /// Number of chromosomes after every generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Number of chromosomes kept by truncation selection.
    #[serde(default = "default_elite_count")]
    pub elite_count: usize,
    /// Probability that a parent pair is recombined instead of copied.
    #[serde(default = "default_crossover_prob")]
    pub crossover_prob: f64,
    /// Direction of the fitness objective.
    #[serde(default)]
    pub fitness_type: FitnessType,
    /// Generation cap.
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
    /// How the best fitness of a generation is computed.
    #[serde(default)]
    pub fitness_reporting: FitnessReporting,
    /// Log a progress line every this many generations.
    #[serde(default = "default_report_interval")]
    pub report_interval: usize,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            gene_count: default_gene_count(),
            mutation_prob: default_mutation_prob(),
            population_size: default_population_size(),
            elite_count: default_elite_count(),
            crossover_prob: default_crossover_prob(),
            fitness_type: FitnessType::default(),
            max_generations: default_max_generations(),
            fitness_reporting: FitnessReporting::default(),
            report_interval: default_report_interval(),
            random_seed: None,
        }
    }
}

fn default_gene_count() -> usize {
    400
}
fn default_mutation_prob() -> f64 {
    0.002
}
fn default_population_size() -> usize {
    600
}
fn default_elite_count() -> usize {
    20
}
fn default_crossover_prob() -> f64 {
    0.95
}
fn default_max_generations() -> usize {
    300
}
fn default_report_interval() -> usize {
    10
}

/// Fitness objective.
///
/// Only minimisation of squared error is defined; a fitness of 0 means
/// the chromosome matches the target exactly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FitnessType {
    #[default]
    Min,
}

/// When the generation's best fitness is measured.
///
/// Fitness is evaluated before selection, but the best fitness of a
/// generation is read after crossover and mutation have replaced the
/// population.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FitnessReporting {
    /// Re-evaluate the mutated population before taking the minimum.
    /// The evaluation is reused by the next generation's selection.
    #[default]
    Reevaluated,
    /// Take the minimum over the fitness values the mutated population
    /// carries: offspring hold the unevaluated sentinel and verbatim
    /// copies hold their parents' pre-mutation fitness.
    Stale,
}

/// State of the generation loop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RunState {
    /// More generations remain.
    #[default]
    Running,
    /// Best fitness reached 0.
    Converged,
    /// Generation cap reached without convergence.
    Exhausted,
}

impl RunState {
    /// Whether the loop has stopped.
    pub fn is_terminal(self) -> bool {
        !matches!(self, RunState::Running)
    }
}

/// Snapshot of a chromosome for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChromosomeSnapshot {
    /// Gene values (0 or 1).
    pub genes: Vec<u8>,
    /// Fitness at the time of the snapshot.
    pub fitness: f64,
}

/// Final result of an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Best chromosome of the final population.
    pub best: ChromosomeSnapshot,
    /// Statistics from the run.
    pub stats: EvolutionStats,
    /// Best fitness per generation.
    pub best_fitness_history: Vec<f64>,
}

/// Statistics from an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Generations executed.
    pub generations: usize,
    /// Fitness evaluations performed.
    pub total_evaluations: u64,
    /// Best fitness of the last generation.
    pub best_fitness: f64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Terminal state of the loop.
    pub state: RunState,
}

// ============================================================================
// Validation
// ============================================================================

/// Evolution configuration validation errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EvolutionConfigError {
    #[error("Gene count must be positive")]
    InvalidGeneCount,
    #[error("Population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("Elite count must be at least 2, got {0}")]
    EliteTooSmall(usize),
    #[error("Elite count {elite} exceeds population size {population}")]
    EliteExceedsPopulation { elite: usize, population: usize },
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("Generation cap must be positive")]
    InvalidGenerationCap,
    #[error("Report interval must be positive")]
    InvalidReportInterval,
    #[error("Gene count {gene_count} does not match target length {target_len}")]
    TargetMismatch { gene_count: usize, target_len: usize },
}

impl EvolutionConfig {
    /// Validate evolution configuration.
    pub fn validate(&self) -> Result<(), EvolutionConfigError> {
        if self.gene_count == 0 {
            return Err(EvolutionConfigError::InvalidGeneCount);
        }

        if self.population_size < 2 {
            return Err(EvolutionConfigError::PopulationTooSmall(
                self.population_size,
            ));
        }

        // Crossover draws two distinct parents from the elites.
        if self.elite_count < 2 {
            return Err(EvolutionConfigError::EliteTooSmall(self.elite_count));
        }
        if self.elite_count > self.population_size {
            return Err(EvolutionConfigError::EliteExceedsPopulation {
                elite: self.elite_count,
                population: self.population_size,
            });
        }

        let check_probability = |value: f64, name: &'static str| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(EvolutionConfigError::InvalidProbability { name, value })
            }
        };

        check_probability(self.mutation_prob, "mutation_prob")?;
        check_probability(self.crossover_prob, "crossover_prob")?;

        if self.max_generations == 0 {
            return Err(EvolutionConfigError::InvalidGenerationCap);
        }
        if self.report_interval == 0 {
            return Err(EvolutionConfigError::InvalidReportInterval);
        }

        Ok(())
    }

    /// Validate the configuration against a target of `target_len` bits.
    pub fn validate_for_target(&self, target_len: usize) -> Result<(), EvolutionConfigError> {
        self.validate()?;
        if self.gene_count != target_len {
            return Err(EvolutionConfigError::TargetMismatch {
                gene_count: self.gene_count,
                target_len,
            });
        }
        Ok(())
    }
}
