//! Genetic algorithm for the symmetric TSP.
//!
//! Tours are permutations of city indices; fitness is the inverse of the
//! closed tour length. Each generation applies, in order:
//!
//! 1. [`roulette_select`]: fitness-proportionate sampling with replacement
//! 2. [`crossover_population`]: single-point segment exchange on adjacent
//!    pairs, repaired so children stay permutations
//! 3. [`mutate_population`]: low-probability pairwise swaps
//! 4. [`evaluate_population`]: fitness of the new population
//!
//! [`GaRunner`] tracks the best tour and stops once it has not strictly
//! improved for `stagnation_limit` generations, or after `max_generations`.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters
//! - [`GaRunner`]: Executes the evolutionary loop, one [`step`](GaRunner::step)
//!   at a time or to completion
//! - [`GaResult`]: Final result with statistics
//! - [`GaObserver`]: Receives progress and completion events
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling Salesman
//!   Problem: A Review of Representations and Operators"

mod config;
mod fitness;
mod observer;
mod operators;
mod population;
mod runner;
mod selection;
mod tour;

pub use config::GaConfig;
pub use fitness::{evaluate_population, fitness, tour_length};
pub use observer::{
    CollectingObserver, GaObserver, NoopObserver, ProgressEvent, RunReport, TracingObserver,
};
pub use operators::{crossover_population, mutate_population, segment_crossover, swap_mutation};
pub use population::{best_index, Population};
pub use runner::{solve, BestSolution, GaResult, GaRunner, RunState};
pub use selection::{roulette_select, RouletteWheel};
pub use tour::{is_permutation, Tour};
