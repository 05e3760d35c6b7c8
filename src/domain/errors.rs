//! Domain error types
//!
//! This module defines the error hierarchy for the marketing loader.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main loader error type
///
/// This is the primary error type used throughout the application.
/// Driver, pool and serialization errors are converted into one of these
/// variants at the adapter boundary.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Query or statement failures
    #[error("Database error: {0}")]
    Database(String),

    /// Pool creation or connection acquisition failures
    #[error("Connection error: {0}")]
    Connection(String),

    /// Destination schema reset failures (fatal for a load run)
    #[error("Schema error: {0}")]
    Schema(String),

    /// Table load errors
    #[error("Load error: {0}")]
    Load(String),

    /// Event publishing errors
    #[error("Event error: {0}")]
    Event(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl LoaderError {
    /// Returns true for errors that abort a whole load run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LoaderError::Schema(_) | LoaderError::Configuration(_) | LoaderError::Connection(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LoaderError {
    fn from(err: serde_json::Error) -> Self {
        LoaderError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LoaderError {
    fn from(err: toml::de::Error) -> Self {
        LoaderError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<tokio_postgres::Error> for LoaderError {
    fn from(err: tokio_postgres::Error) -> Self {
        LoaderError::Database(err.to_string())
    }
}

impl From<deadpool_postgres::PoolError> for LoaderError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        LoaderError::Connection(format!("Failed to get connection from pool: {err}"))
    }
}
