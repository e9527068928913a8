//! Custom error types for the common library
//!
//! This module defines the errors raised while loading client configuration
//! and while reading or writing durable local storage.

use thiserror::Error;

/// Custom error type for local storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error occurred while reading or writing the backing file
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but does not hold a JSON object of strings
    #[error("Storage file is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
}

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Custom error type for configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error occurred while merging configuration sources
    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),

    /// A configured value could not be used
    #[error("Invalid configuration value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Type alias for Result with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
