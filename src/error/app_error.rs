use thiserror::Error;

use crate::error::DatabaseErrorConverter;

/// Application-wide error type that represents all possible errors in the system.
///
/// The first three variants form the public error contract of the API:
/// NotFound maps to 404, Validation to 400 and Duplicate to 409. The rest
/// cover infrastructure failures.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Duplicate entry error for unique constraint violations
    #[error("Duplicate entry: {entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Backend unreachable or returned a malformed response (gateway only)
    #[error("Upstream request failed")]
    Upstream {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Shorthand for the common "entity with id=N not found" case.
    pub fn not_found(entity: &str, id: i64) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            field: "id".to_string(),
            value: id.to_string(),
        }
    }

    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<diesel_async::pooled_connection::bb8::RunError> for AppError {
    fn from(error: diesel_async::pooled_connection::bb8::RunError) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        AppError::Upstream {
            source: anyhow::Error::from(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_shorthand() {
        let err = AppError::not_found("user", 42);
        assert_eq!(
            err.to_string(),
            "Resource not found: user with id=42"
        );
    }

    #[test]
    fn test_validation_shorthand() {
        let err = AppError::validation("state", "unknown state");
        match err {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "state");
                assert_eq!(reason, "unknown state");
            }
            other => panic!("Expected Validation, got: {:?}", other),
        }
    }
}
