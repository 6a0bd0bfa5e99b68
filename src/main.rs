//! Bitvolve CLI - Evolve a binary image from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::path::{Path, PathBuf};

use bitvolve::{
    imaging::TerminalRenderer,
    run::{self, RunError},
    schema::{EvolutionResult, RunConfig},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [image]", args[0]);
        eprintln!();
        eprintln!("Evolve a binary image toward a target with a genetic algorithm.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to run configuration file");
        eprintln!("  image        Target image, PNG/JPEG/Netpbm/... (overrides image.path in the config)");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);
    let image_path = args.get(2).map(PathBuf::from);

    if let Err(e) = run_cli(&config_path, image_path.as_deref()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_cli(config_path: &Path, image_path: Option<&Path>) -> Result<(), RunError> {
    let config = run::load_config(config_path)?;
    let target = run::load_target(&config, image_path)?;
    let evolution = &config.evolution;

    println!("Bitvolve");
    println!("========");
    println!(
        "Target: {}x{} ({} bits)",
        target.width(),
        target.height(),
        target.len()
    );
    println!(
        "Population: {} (elite {})",
        evolution.population_size, evolution.elite_count
    );
    println!(
        "Crossover: {}, mutation: {}",
        evolution.crossover_prob, evolution.mutation_prob
    );
    println!("Max generations: {}", evolution.max_generations);
    println!();

    let mut renderer = TerminalRenderer::stdout(config.render_interval);
    let result = run::execute(&config, target, &mut renderer)?;

    print_summary(&result);
    Ok(())
}

fn print_summary(result: &EvolutionResult) {
    let stats = &result.stats;

    println!("Finished: {:?}", stats.state);
    println!("  Generations: {}", stats.generations);
    println!("  Best fitness: {}", stats.best_fitness);
    println!("  Evaluations: {}", stats.total_evaluations);
    println!(
        "  Time: {:.2}s ({:.1} generations/s)",
        stats.elapsed_seconds,
        stats.generations as f64 / stats.elapsed_seconds.max(f64::EPSILON)
    );
    println!();

    println!("Best fitness per generation:");
    for (chunk_start, chunk) in result.best_fitness_history.chunks(10).enumerate() {
        let values: Vec<String> = chunk.iter().map(|f| f.to_string()).collect();
        println!("  {:>5}: {}", chunk_start * 10, values.join(" "));
    }
}

fn print_example_config() {
    let config = RunConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing example config: {}", e);
            std::process::exit(1);
        }
    }
}
