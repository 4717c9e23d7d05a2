//! Error types for Decision Worth.

use thiserror::Error;

/// Result type alias for Decision Worth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Decision Worth.
#[derive(Error, Debug)]
pub enum Error {
    // Ingestion errors (10-19)
    #[error("payoff ingestion failed: {0}")]
    Ingestion(String),

    #[error("payoff table shape invalid: {0}")]
    TableShape(String),

    // Criterion errors (20-29)
    #[error("unknown decision criterion '{name}'")]
    UnknownCriterion { name: String },

    // Rate errors (30-39)
    #[error("rate specification invalid: {0}")]
    RateSpecification(String),

    #[error("IRR failed to converge after {iterations} iterations (last rate estimate {last_rate})")]
    NonConvergence { iterations: u64, last_rate: f64 },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting and process exit codes.
    pub fn code(&self) -> u32 {
        match self {
            Error::Ingestion(_) => 10,
            Error::TableShape(_) => 11,
            Error::UnknownCriterion { .. } => 20,
            Error::RateSpecification(_) => 30,
            Error::NonConvergence { .. } => 31,
            Error::Io(_) => 60,
        }
    }
}
