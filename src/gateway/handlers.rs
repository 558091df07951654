//! Gateway request handlers.
//!
//! Each handler validates its input locally, then forwards to the
//! backend through the shared client. Backend responses pass through
//! untouched, so error bodies stay identical across the two tiers.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use reqwest::Method;
use serde::Deserialize;
use validator::Validate;

use crate::api::dto::{
    CreateBookingRequest, CreateCommentRequest, CreateItemRequest, CreateItemRequestDto,
    CreateUserRequest, UpdateItemRequest, UpdateUserRequest,
};
use crate::api::middleware::SharerId;
use crate::error::AppError;
use crate::gateway::{GatewayState, validate_dto};

fn default_state() -> String {
    "ALL".to_string()
}

fn default_size() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
pub struct StateQuery {
    #[serde(default = "default_state")]
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct ApprovedQuery {
    pub approved: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PageQuery {
    #[serde(default)]
    #[validate(range(min = 0, message = "from must not be negative"))]
    pub from: i64,
    #[serde(default = "default_size")]
    #[validate(range(min = 1, message = "size must be positive"))]
    pub size: i64,
}

// Users

pub async fn create_user(
    State(state): State<GatewayState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Response, AppError> {
    validate_dto(&payload)?;
    let body = serde_json::to_value(&payload).map_err(anyhow::Error::from)?;
    state
        .client
        .forward(Method::POST, "/users", None, &[], Some(&body))
        .await
}

pub async fn get_user(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    state
        .client
        .forward(Method::GET, &format!("/users/{}", id), None, &[], None)
        .await
}

pub async fn update_user(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Response, AppError> {
    validate_dto(&payload)?;
    let body = serde_json::to_value(&payload).map_err(anyhow::Error::from)?;
    state
        .client
        .forward(
            Method::PATCH,
            &format!("/users/{}", id),
            None,
            &[],
            Some(&body),
        )
        .await
}

pub async fn delete_user(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    state
        .client
        .forward(Method::DELETE, &format!("/users/{}", id), None, &[], None)
        .await
}

// Items

pub async fn create_item(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Json(payload): Json<CreateItemRequest>,
) -> Result<Response, AppError> {
    validate_dto(&payload)?;
    let body = serde_json::to_value(&payload).map_err(anyhow::Error::from)?;
    state
        .client
        .forward(Method::POST, "/items", Some(user_id), &[], Some(&body))
        .await
}

pub async fn update_item(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Response, AppError> {
    validate_dto(&payload)?;
    let body = serde_json::to_value(&payload).map_err(anyhow::Error::from)?;
    state
        .client
        .forward(
            Method::PATCH,
            &format!("/items/{}", id),
            Some(user_id),
            &[],
            Some(&body),
        )
        .await
}

pub async fn get_item(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    state
        .client
        .forward(
            Method::GET,
            &format!("/items/{}", id),
            Some(user_id),
            &[],
            None,
        )
        .await
}

pub async fn list_owner_items(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
) -> Result<Response, AppError> {
    state
        .client
        .forward(Method::GET, "/items", Some(user_id), &[], None)
        .await
}

pub async fn search_items(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError> {
    state
        .client
        .forward(
            Method::GET,
            "/items/search",
            Some(user_id),
            &[("text", query.text)],
            None,
        )
        .await
}

pub async fn add_comment(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<Response, AppError> {
    validate_dto(&payload)?;
    let body = serde_json::to_value(&payload).map_err(anyhow::Error::from)?;
    state
        .client
        .forward(
            Method::POST,
            &format!("/items/{}/comment", id),
            Some(user_id),
            &[],
            Some(&body),
        )
        .await
}

// Bookings

pub async fn create_booking(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Response, AppError> {
    validate_dto(&payload)?;
    let body = serde_json::to_value(&payload).map_err(anyhow::Error::from)?;
    state
        .client
        .forward(Method::POST, "/bookings", Some(user_id), &[], Some(&body))
        .await
}

pub async fn update_booking_status(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    Query(query): Query<ApprovedQuery>,
) -> Result<Response, AppError> {
    state
        .client
        .forward(
            Method::PATCH,
            &format!("/bookings/{}", id),
            Some(user_id),
            &[("approved", query.approved.to_string())],
            None,
        )
        .await
}

pub async fn get_booking(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    state
        .client
        .forward(
            Method::GET,
            &format!("/bookings/{}", id),
            Some(user_id),
            &[],
            None,
        )
        .await
}

pub async fn list_renter_bookings(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> Result<Response, AppError> {
    state
        .client
        .forward(
            Method::GET,
            "/bookings",
            Some(user_id),
            &[("state", query.state)],
            None,
        )
        .await
}

pub async fn list_owner_bookings(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> Result<Response, AppError> {
    state
        .client
        .forward(
            Method::GET,
            "/bookings/owner",
            Some(user_id),
            &[("state", query.state)],
            None,
        )
        .await
}

// Item requests

pub async fn create_request(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Json(payload): Json<CreateItemRequestDto>,
) -> Result<Response, AppError> {
    validate_dto(&payload)?;
    let body = serde_json::to_value(&payload).map_err(anyhow::Error::from)?;
    state
        .client
        .forward(Method::POST, "/requests", Some(user_id), &[], Some(&body))
        .await
}

pub async fn list_own_requests(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
) -> Result<Response, AppError> {
    state
        .client
        .forward(Method::GET, "/requests", Some(user_id), &[], None)
        .await
}

pub async fn list_all_requests(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    validate_dto(&query)?;
    state
        .client
        .forward(
            Method::GET,
            "/requests/all",
            Some(user_id),
            &[
                ("from", query.from.to_string()),
                ("size", query.size.to_string()),
            ],
            None,
        )
        .await
}

pub async fn get_request(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    state
        .client
        .forward(
            Method::GET,
            &format!("/requests/{}", id),
            Some(user_id),
            &[],
            None,
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_rejects_negative_from() {
        let query = PageQuery { from: -1, size: 10 };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_page_query_rejects_zero_size() {
        let query = PageQuery { from: 0, size: 0 };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_page_query_accepts_defaults() {
        let query = PageQuery {
            from: 0,
            size: default_size(),
        };
        assert!(query.validate().is_ok());
    }
}
