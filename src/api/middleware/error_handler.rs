//! Error handler for converting AppError to HTTP responses.
//!
//! Implements IntoResponse for AppError so handlers can return
//! `AppResult<T>` directly. Infrastructure errors are sanitized; their
//! sources are logged here, never sent to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404 NOT_FOUND
    /// - Duplicate → 409 CONFLICT
    /// - Validation → 400 BAD_REQUEST
    /// - BadRequest → 400 BAD_REQUEST
    /// - Database → 500 INTERNAL_SERVER_ERROR
    /// - ConnectionPool → 503 SERVICE_UNAVAILABLE
    /// - Upstream → 502 BAD_GATEWAY
    /// - Internal → 500 INTERNAL_SERVER_ERROR
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        let error_response = match &self {
            AppError::NotFound { .. }
            | AppError::Duplicate { .. }
            | AppError::Validation { .. }
            | AppError::BadRequest { .. } => ErrorResponse::new(&self.to_string()),
            AppError::Database { operation, source } => {
                error!(operation = %operation, error = %source, "Database error");
                ErrorResponse::new("Database operation failed").with_details(operation)
            }
            AppError::ConnectionPool { source } => {
                error!(error = %source, "Connection pool error");
                ErrorResponse::new("Database connection unavailable")
            }
            AppError::Upstream { source } => {
                error!(error = %source, "Upstream request failed");
                ErrorResponse::new("Upstream service unavailable")
            }
            AppError::Internal { source } => {
                error!(error = %source, "Internal error");
                ErrorResponse::new("An internal error occurred")
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status_code() {
        let error = AppError::not_found("user", 123);
        assert_eq!(error_to_status_code(&error), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_duplicate_status_code() {
        let error = AppError::Duplicate {
            entity: "user".to_string(),
            field: "email".to_string(),
            value: "test@example.com".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_status_code() {
        let error = AppError::validation("email", "invalid format");
        assert_eq!(error_to_status_code(&error), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_status_code() {
        let error = AppError::Upstream {
            source: anyhow::anyhow!("connection refused"),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_connection_pool_status_code() {
        let error = AppError::ConnectionPool {
            source: anyhow::anyhow!("pool exhausted"),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_not_found_response_carries_message() {
        let error = AppError::not_found("item", 7);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
