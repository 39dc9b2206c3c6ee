//! Error types for the tumor-trial analysis pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the tumor-trial analysis pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data error (malformed or inconsistent records).
    #[error("Data error: {0}")]
    Data(String),

    /// Statistic requested on an empty sample.
    #[error("Empty sample: {0}")]
    EmptySample(String),

    /// Not enough data points for the requested statistic.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Regression could not be fitted.
    #[error("Regression error: {0}")]
    Regression(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Error::Data(msg.into())
    }

    /// Create an empty-sample error.
    pub fn empty_sample(msg: impl Into<String>) -> Self {
        Error::EmptySample(msg.into())
    }

    /// Create an insufficient-data error.
    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Error::InsufficientData(msg.into())
    }

    /// Create a regression error.
    pub fn regression(msg: impl Into<String>) -> Self {
        Error::Regression(msg.into())
    }

    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}
