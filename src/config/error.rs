//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Minimum password length must be at least 1")]
    InvalidPasswordLength,

    #[error("UTC offset {0} minutes is outside -840..=840")]
    InvalidUtcOffset(i32),

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
