//! Error types for liveboard-core

use thiserror::Error;

/// Result type alias using liveboard-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in liveboard-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Shift source failure
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Backend refused a schedule update
    #[error("Update rejected: {0}")]
    Rejected(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
