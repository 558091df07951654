//! Configuration error types

use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Validation error with field and message
    #[error("Validation error: {field} - {message}")]
    ValidationError { field: String, message: String },

    /// Generic configuration error from config crate
    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ConfigError> for crate::error::AppError {
    fn from(error: ConfigError) -> Self {
        crate::error::AppError::Internal {
            source: anyhow::Error::from(error),
        }
    }
}
