//! Item and comment DTOs for API requests and responses.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::BookingResponse;
use crate::models::{Comment, Item, NewItem, UpdateItem};
use crate::services::ItemDetails;

/// Request body for listing a new item.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 255, message = "Name must not be blank"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description must not be blank"))]
    pub description: String,
    pub available: bool,
    /// Optional id of the item request this listing answers
    pub request_id: Option<i64>,
}

impl CreateItemRequest {
    /// Converts into a NewItem; the owner comes from the caller header and
    /// is filled in by the service.
    pub fn into_new_item(self) -> NewItem {
        NewItem {
            name: self.name,
            description: self.description,
            available: self.available,
            owner_id: 0,
            request_id: self.request_id,
        }
    }
}

/// Request body for partially updating an item.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 255, message = "Name must not be blank"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Description must not be blank"))]
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl UpdateItemRequest {
    pub fn into_update_item(self) -> UpdateItem {
        UpdateItem {
            name: self.name,
            description: self.description,
            available: self.available,
        }
    }
}

/// Response body for item data.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            owner_id: item.owner_id,
            request_id: item.request_id,
        }
    }
}

/// Response body for a single item fetched by id: the item plus its
/// comments, and for the owner the adjacent approved bookings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetailsResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
    pub comments: Vec<CommentResponse>,
    pub last_booking: Option<BookingResponse>,
    pub next_booking: Option<BookingResponse>,
}

impl From<ItemDetails> for ItemDetailsResponse {
    fn from(details: ItemDetails) -> Self {
        Self {
            id: details.item.id,
            name: details.item.name,
            description: details.item.description,
            available: details.item.available,
            owner_id: details.item.owner_id,
            request_id: details.item.request_id,
            comments: details
                .comments
                .into_iter()
                .map(CommentResponse::from)
                .collect(),
            last_booking: details.last_booking.map(BookingResponse::from),
            next_booking: details.next_booking.map(BookingResponse::from),
        }
    }
}

/// Request body for adding a comment to an item.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Comment text must not be blank"))]
    pub text: String,
}

/// Response body for a comment, carrying the author's display name.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    #[schema(value_type = String, format = DateTime)]
    pub created: DateTime,
}

impl From<(Comment, String)> for CommentResponse {
    fn from((comment, author_name): (Comment, String)) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author_name,
            created: comment.created.to_jiff(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_item_request_rejects_blank_name() {
        let req = CreateItemRequest {
            name: "".to_string(),
            description: "A sturdy drill".to_string(),
            available: true,
            request_id: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_item_response_uses_camel_case_keys() {
        let response = ItemResponse {
            id: 1,
            name: "Drill".to_string(),
            description: "A sturdy drill".to_string(),
            available: true,
            owner_id: 7,
            request_id: Some(3),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["ownerId"], 7);
        assert_eq!(json["requestId"], 3);
    }

    #[test]
    fn test_comment_request_rejects_empty_text() {
        let req = CreateCommentRequest {
            text: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
