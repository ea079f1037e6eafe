//! Error types for the solver

use thiserror::Error;
use wbsforge_config::ConfigError;
use wbsforge_core::WbsError;

/// Errors raised before or around a minimizer run.
///
/// Non-convergence is not an error; it is reported through
/// [`MinimizeStatus`](crate::MinimizeStatus).
#[derive(Debug, Error)]
pub enum SolverError {
    /// Error in the staffing model
    #[error(transparent)]
    Model(#[from] WbsError),

    /// Error in solver configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A bound pair is not finite or has `min > max`
    #[error("Invalid bound ({min}, {max}) for variable {index}")]
    InvalidBounds { index: usize, min: f64, max: f64 },

    /// Bounds or starting point don't match the objective's dimension
    #[error("Objective has {expected} variables but got {actual} {what}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Result type alias for solver operations
pub type Result<T> = std::result::Result<T, SolverError>;
