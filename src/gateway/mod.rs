//! Gateway tier: validates requests and forwards them to the backend.
//!
//! The gateway owns input validation (shape, formats, value bounds) so
//! the backend only deals with business rules. Valid requests are
//! relayed over HTTP and the backend's status and body pass through
//! verbatim.

mod client;
mod handlers;
mod routes;
mod server;

pub use client::BackendClient;
pub use routes::create_gateway_router;
pub use server::GatewayServer;

use validator::Validate;

use crate::error::{AppError, AppResult};

/// State shared by all gateway handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub client: BackendClient,
}

/// Runs validator-derived checks, flattening the first failure into a
/// Validation error.
pub(crate) fn validate_dto<T: Validate>(dto: &T) -> AppResult<()> {
    dto.validate().map_err(|errors| {
        let detail = errors
            .field_errors()
            .iter()
            .next()
            .map(|(field, errs)| {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                (field.to_string(), reason)
            });
        match detail {
            Some((field, reason)) => AppError::Validation { field, reason },
            None => AppError::validation("body", "invalid request body"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::CreateUserRequest;

    #[test]
    fn test_validate_dto_reports_failing_field() {
        let dto = CreateUserRequest {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
        };
        let err = validate_dto(&dto).unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field, "email"),
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_validate_dto_accepts_valid_input() {
        let dto = CreateUserRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        assert!(validate_dto(&dto).is_ok());
    }
}
