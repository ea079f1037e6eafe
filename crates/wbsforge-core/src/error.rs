//! Error types for WBSForge

use thiserror::Error;

/// Main error type for model construction.
#[derive(Debug, Error, PartialEq)]
pub enum WbsError {
    /// An eligibility override names a project that does not exist.
    #[error("Employee '{employee}' has an override for unknown project '{project}'")]
    UnknownProject { employee: String, project: String },

    /// An eligibility entry names an employee that does not exist.
    #[error("Eligibility entry for unknown employee '{0}'")]
    UnknownEmployee(String),

    /// The same identifier appears twice in a list.
    #[error("Duplicate {kind} identifier '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    /// A project's FTE target is negative or not finite.
    #[error("Project '{project}' has invalid FTE target {fte}")]
    InvalidFte { project: String, fte: f64 },

    /// A bound pair is not finite or has `min > max`.
    #[error("Invalid bound ({min}, {max}) for employee '{employee}' on project '{project}'")]
    InvalidBound {
        employee: String,
        project: String,
        min: f64,
        max: f64,
    },

    /// A flat vector does not match the matrix shape.
    #[error("Expected {expected} values for a {rows}x{cols} matrix, got {actual}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, WbsError>;
