//! Error types for the TSP solver.
//!
//! Every fallible operation returns [`TspResult`]. None of these errors are
//! retryable: they signal malformed input or a violated operator
//! precondition, and the run is aborted.

use thiserror::Error;

/// Result type alias for solver operations.
pub type TspResult<T> = Result<T, TspError>;

/// Unified error type for loading, configuring and running the GA.
#[derive(Debug, Error)]
pub enum TspError {
    /// A city record could not be parsed.
    #[error("malformed city record on line {line}: {message}")]
    DataFormat {
        /// 1-based line number in the input.
        line: usize,
        /// What was wrong with the record.
        message: String,
    },

    /// The problem instance is too small to define a tour.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Population size is odd or below 2.
    #[error("invalid population size {size}: must be even and at least 2")]
    InvalidPopulationSize {
        /// The rejected size.
        size: usize,
    },

    /// Selection probabilities cannot be derived from the fitness vector.
    #[error("invalid fitness vector: {0}")]
    InvalidFitness(String),

    /// A tour has zero total length, so its fitness is undefined.
    #[error("degenerate tour: total length is zero")]
    DegenerateTour,

    /// Any other out-of-range configuration parameter.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TspError {
    /// Creates a [`TspError::DataFormat`] for the given line.
    pub fn data_format(line: usize, message: impl Into<String>) -> Self {
        Self::DataFormat {
            line,
            message: message.into(),
        }
    }
}
