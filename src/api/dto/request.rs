//! Item request DTOs for API requests and responses.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::ItemResponse;
use crate::services::EnrichedRequest;

/// Request body for posting a new item request.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateItemRequestDto {
    #[validate(length(min = 1, message = "Description must not be blank"))]
    pub description: String,
}

/// Response body for an item request, enriched with the items listed
/// in answer to it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemRequestResponse {
    pub id: i64,
    pub description: String,
    #[schema(value_type = String, format = DateTime)]
    pub created: DateTime,
    pub items: Vec<ItemResponse>,
}

impl From<EnrichedRequest> for ItemRequestResponse {
    fn from(enriched: EnrichedRequest) -> Self {
        Self {
            id: enriched.request.id,
            description: enriched.request.description,
            created: enriched.request.created.to_jiff(),
            items: enriched.items.into_iter().map(ItemResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_rejects_blank_description() {
        let req = CreateItemRequestDto {
            description: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
