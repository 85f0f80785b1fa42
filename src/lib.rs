//! Genetic algorithm solver for the symmetric Traveling Salesman Problem.
//!
//! Given city coordinates, finds a short closed tour visiting every city
//! once. The search is stochastic: results are approximate, and reproducible
//! only when a seed is supplied.
//!
//! # Modules
//!
//! - [`models`]: [`City`](models::City) coordinates
//! - [`distance`]: Euclidean [`DistanceMatrix`](distance::DistanceMatrix)
//! - [`ga`]: tours, operators, and the evolutionary loop
//! - [`io`]: whitespace-delimited city file loader
//! - [`random`]: seeded generator construction
//! - [`error`]: [`TspError`](error::TspError)
//!
//! # Example
//!
//! ```
//! use tsp_ga::ga::{solve, GaConfig, NoopObserver};
//! use tsp_ga::io::parse_cities;
//!
//! let cities = parse_cities("1 0 0\n2 0 1\n3 1 1\n4 1 0\n").unwrap();
//! let config = GaConfig::default()
//!     .with_population_size(50)
//!     .with_max_generations(500)
//!     .with_seed(42);
//! let result = solve(&cities, &config, NoopObserver).unwrap();
//! assert!((result.best_length - 4.0).abs() < 1e-9);
//! ```

pub mod distance;
pub mod error;
pub mod ga;
pub mod io;
pub mod models;
pub mod random;

pub use error::{TspError, TspResult};
