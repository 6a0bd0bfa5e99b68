//! Generation loop driving the population toward the target.

use std::time::Instant;

use log::{debug, info};

use crate::schema::{
    EvolutionConfig, EvolutionConfigError, EvolutionResult, EvolutionStats, FitnessReporting,
    RunState, TargetImage,
};

use super::fitness::FitnessEvaluator;
use super::genome::GenomeRng;
use super::observer::{NoopObserver, Observer};
use super::population::Population;

/// Evolution engine that runs the search.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    target: TargetImage,
    rng: GenomeRng,
    evaluator: FitnessEvaluator,
    population: Population,
    generation: usize,
    evaluations: u64,
    state: RunState,
}

impl EvolutionEngine {
    /// Create a new evolution engine.
    ///
    /// The configuration is validated against the target before any
    /// genes are drawn.
    pub fn new(config: EvolutionConfig, target: TargetImage) -> Result<Self, EvolutionConfigError> {
        config.validate_for_target(target.len())?;

        let seed = config.random_seed.unwrap_or_else(rand::random);
        let mut rng = GenomeRng::new(seed);
        let population = Population::random(config.population_size, config.gene_count, &mut rng);

        info!(
            "Initialized population of {} chromosomes with {} genes (seed {})",
            config.population_size, config.gene_count, seed
        );

        Ok(Self {
            evaluator: FitnessEvaluator::new(config.fitness_type),
            config,
            target,
            rng,
            population,
            generation: 0,
            evaluations: 0,
            state: RunState::Running,
        })
    }

    /// Evaluate all chromosomes in the population.
    fn evaluate_population(&mut self) {
        self.population
            .evaluate_all(&self.evaluator, self.target.bits());
        self.evaluations += self.population.len() as u64;
    }

    /// Run a single generation, reporting the best chromosome to `observer`.
    ///
    /// Returns the state after the generation. Calling this on a finished
    /// engine does nothing.
    pub fn step_with_observer<O>(&mut self, observer: &mut O) -> RunState
    where
        O: Observer + ?Sized,
    {
        if self.state.is_terminal() {
            return self.state;
        }

        let generation = self.generation;

        if !self.population.is_evaluated() {
            self.evaluate_population();
        }

        self.population.select(self.config.elite_count);
        self.population.crossover(
            self.config.population_size,
            self.config.crossover_prob,
            self.config.gene_count,
            &mut self.rng,
        );
        self.population
            .mutate_all(self.config.mutation_prob, &mut self.rng);

        if self.config.fitness_reporting == FitnessReporting::Reevaluated {
            self.evaluate_population();
        }

        if let Some(best) = self.population.best() {
            observer.observe(best, &self.target);
        }

        let best_fitness = self.population.record_best_fitness();
        self.generation += 1;

        let last = generation + 1 == self.config.max_generations;
        if generation % self.config.report_interval == 0 || last {
            info!("Generation {}: best fitness = {}", generation, best_fitness);
        }
        if let Some(mean) = self.population.mean_fitness() {
            debug!("Generation {}: mean fitness = {:.3}", generation, mean);
        }

        self.state = if best_fitness == 0.0 {
            info!("Best fitness is 0 after {} generations", self.generation);
            RunState::Converged
        } else if last {
            info!(
                "Generation cap of {} reached, best fitness = {}",
                self.config.max_generations, best_fitness
            );
            RunState::Exhausted
        } else {
            RunState::Running
        };

        self.state
    }

    /// Run a single generation without observation.
    pub fn step(&mut self) -> RunState {
        self.step_with_observer(&mut NoopObserver)
    }

    /// Run evolution to completion, reporting every generation to `observer`.
    pub fn run_with_observer<O>(&mut self, observer: &mut O) -> EvolutionResult
    where
        O: Observer + ?Sized,
    {
        let start_time = Instant::now();
        while !self.step_with_observer(observer).is_terminal() {}
        self.result(start_time.elapsed().as_secs_f64())
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> EvolutionResult {
        self.run_with_observer(&mut NoopObserver)
    }

    fn result(&self, elapsed_seconds: f64) -> EvolutionResult {
        let best = self
            .population
            .best()
            .map(|c| c.to_snapshot())
            .expect("population is never empty after initialization");

        EvolutionResult {
            stats: EvolutionStats {
                generations: self.generation,
                total_evaluations: self.evaluations,
                best_fitness: self.population.best_fitness(),
                elapsed_seconds,
                state: self.state,
            },
            best,
            best_fitness_history: self.population.best_fitness_history().to_vec(),
        }
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn target(&self) -> &TargetImage {
        &self.target
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Generations executed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Fitness evaluations performed so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}
