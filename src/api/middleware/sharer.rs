//! Extractor for the shared-user identification header.
//!
//! Callers identify themselves with the X-Sharer-User-Id header. The
//! gateway is trusted to have performed any authentication; here the
//! header is only required to be present and numeric.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Header carrying the id of the acting user.
pub const SHARER_USER_HEADER: &str = "x-sharer-user-id";

/// The acting user's id, taken from the X-Sharer-User-Id header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerId(pub i64);

impl<S> FromRequestParts<S> for SharerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SHARER_USER_HEADER)
            .ok_or_else(|| AppError::BadRequest {
                message: "Missing X-Sharer-User-Id header".to_string(),
            })?;

        let value = raw.to_str().map_err(|_| AppError::BadRequest {
            message: "Invalid X-Sharer-User-Id header".to_string(),
        })?;

        let id = value.parse::<i64>().map_err(|_| AppError::BadRequest {
            message: format!("Invalid X-Sharer-User-Id header: '{}'", value),
        })?;

        Ok(SharerId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(value: Option<&str>) -> Result<SharerId, AppError> {
        let mut builder = Request::builder().uri("/items");
        if let Some(v) = value {
            builder = builder.header(SHARER_USER_HEADER, v);
        }
        let request = builder.body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        SharerId::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_parses_numeric_header() {
        let id = extract(Some("42")).await.unwrap();
        assert_eq!(id, SharerId(42));
    }

    #[tokio::test]
    async fn test_missing_header_is_bad_request() {
        let err = extract(None).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_non_numeric_header_is_bad_request() {
        let err = extract(Some("abc")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }
}
