use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tsp_ga::ga::{solve, GaConfig, TracingObserver};
use tsp_ga::io::load_cities;
use tsp_ga::TspResult;

/// Approximate a shortest closed tour through the cities in a file.
#[derive(Parser, Debug)]
#[command(name = "tsp-ga", version, about)]
struct Args {
    /// City file: one `<id> <x> <y>` record per line.
    cities: PathBuf,

    /// Number of tours per generation (even, at least 2).
    #[arg(long, default_value_t = 100)]
    population: usize,

    /// Upper bound on generations.
    #[arg(long, default_value_t = 100_000)]
    max_generations: usize,

    /// Per-tour swap mutation probability.
    #[arg(long, default_value_t = 0.01)]
    mutation_rate: f64,

    /// Generations without improvement before stopping.
    #[arg(long, default_value_t = 2000)]
    stagnation_limit: usize,

    /// Log progress every N generations (0 disables).
    #[arg(long, default_value_t = 200)]
    report_interval: usize,

    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Evaluate fitness on the rayon thread pool.
    #[arg(long)]
    parallel: bool,
}

impl Args {
    fn config(&self) -> GaConfig {
        GaConfig {
            population_size: self.population,
            max_generations: self.max_generations,
            mutation_rate: self.mutation_rate,
            stagnation_limit: self.stagnation_limit,
            report_interval: self.report_interval,
            seed: self.seed,
            parallel: self.parallel,
        }
    }
}

fn run(args: &Args) -> TspResult<()> {
    let cities = load_cities(&args.cities)?;
    let result = solve(&cities, &args.config(), TracingObserver)?;

    println!("best tour: {:?}", result.best.as_slice());
    println!("total length: {}", result.best_length);
    println!(
        "stopped after {} generations ({:?}) in {:.3}s",
        result.generations,
        result.state,
        result.elapsed.as_secs_f64()
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "run aborted");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
