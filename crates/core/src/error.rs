//! Error types for the sales report system.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the sales report system.
#[derive(Error, Debug)]
pub enum Error {
    /// Top-level collections are missing, not sequences, or empty.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A revenue or bonus strategy was not supplied.
    #[error("Invalid strategy: {0}")]
    InvalidStrategy(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create an invalid strategy error.
    pub fn invalid_strategy(msg: impl Into<String>) -> Self {
        Error::InvalidStrategy(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    pub fn is_invalid_strategy(&self) -> bool {
        matches!(self, Error::InvalidStrategy(_))
    }
}
