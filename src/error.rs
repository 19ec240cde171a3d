//! Minder error types

use thiserror::Error;

/// Minder error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Classifier error (invalid rule pattern)
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for minder operations
pub type Result<T> = std::result::Result<T, Error>;
