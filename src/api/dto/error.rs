//! Error response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response format.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with a message.
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            details: None,
        }
    }

    /// Adds details to the error response.
    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }
}
