//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.
//! Operators never fall back to hidden defaults; the runner passes these
//! values explicitly.

use crate::error::{TspError, TspResult};

/// Configuration for the TSP genetic algorithm.
///
/// # Defaults
///
/// ```
/// use tsp_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 100_000);
/// assert_eq!(config.stagnation_limit, 2000);
/// assert_eq!(config.report_interval, 200);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tsp_ga::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_max_generations(500)
///     .with_mutation_rate(0.02)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of tours in the population.
    ///
    /// Must be even, since crossover works on adjacent pairs.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Probability that a tour undergoes a swap mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Consecutive generations without strict improvement before the run
    /// is declared converged.
    pub stagnation_limit: usize,

    /// Emit a progress event every this many generations. 0 disables them.
    pub report_interval: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to evaluate fitness in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 100_000,
            mutation_rate: 0.01,
            stagnation_limit: 2000,
            report_interval: 200,
            seed: None,
            parallel: false,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the stagnation limit.
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the progress reporting interval (0 to disable).
    pub fn with_report_interval(mut self, interval: usize) -> Self {
        self.report_interval = interval;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - [`TspError::InvalidPopulationSize`] for an odd size or one below 2
    /// - [`TspError::Config`] for any other invalid parameter
    pub fn validate(&self) -> TspResult<()> {
        if self.population_size < 2 || self.population_size % 2 != 0 {
            return Err(TspError::InvalidPopulationSize {
                size: self.population_size,
            });
        }
        if self.max_generations == 0 {
            return Err(TspError::Config("max_generations must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TspError::Config(format!(
                "mutation_rate {} must be within [0, 1]",
                self.mutation_rate
            )));
        }
        if self.stagnation_limit == 0 {
            return Err(TspError::Config("stagnation_limit must be at least 1".into()));
        }
        Ok(())
    }
}
