//! Error types for index-tracker.

use thiserror::Error;

/// Error type for tracking-problem operations.
#[derive(Debug, Error)]
pub enum TrackError {
    /// Input data has an unusable shape.
    #[error("{0}")]
    InvalidShape(String),

    /// Operands have incompatible dimensions.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: String, got: String },

    /// The requested solver engine is not available.
    #[error("Unknown solver: {0}")]
    UnknownSolver(String),

    /// The backend does not recognize a solver option.
    #[error("Unsupported solver option: {0}")]
    UnsupportedOption(String),

    /// A solver option value has the wrong type or range.
    #[error("Invalid value for solver option {option}: {reason}")]
    InvalidOptionValue { option: String, reason: String },

    /// Solver error.
    #[error("Solver error: {0}")]
    SolverError(String),
}

/// Result type for tracking-problem operations.
pub type Result<T> = std::result::Result<T, TrackError>;
