//! Item and comment request handlers.
//!
//! All item operations act on behalf of the user named in the
//! X-Sharer-User-Id header.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ITEM_TAG;
use crate::api::dto::{
    CommentResponse, CreateCommentRequest, CreateItemRequest, ItemDetailsResponse, ItemResponse,
    UpdateItemRequest,
};
use crate::api::middleware::SharerId;
use crate::error::AppError;
use crate::state::AppState;

/// Creates item-related routes.
///
/// Routes:
/// - POST /              - List a new item
/// - GET /               - All items of the calling owner
/// - PATCH /{id}         - Partially update an item (owner only)
/// - GET /{id}           - Item with comments (and bookings for the owner)
/// - GET /search?text=   - Search available items
/// - POST /{id}/comment  - Comment after a completed booking
pub fn item_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_item, list_owner_items))
        .routes(routes!(get_item, update_item))
        .routes(routes!(search_items))
        .routes(routes!(add_comment))
}

#[derive(Debug, Deserialize, IntoParams)]
struct SearchQuery {
    /// Substring to match against item names and descriptions
    #[serde(default)]
    text: String,
}

/// POST /items - List a new item owned by the calling user
#[utoipa::path(
    post,
    path = "/",
    tag = ITEM_TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Acting user id")),
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item listed", body = ItemResponse),
        (status = 404, description = "Owner not found")
    )
)]
async fn create_item(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    Json(payload): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), AppError> {
    let new_item = payload.into_new_item();
    let item = state.services.items.create_item(user_id, new_item).await?;
    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

/// PATCH /items/{id} - Partially update an item
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = ITEM_TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user id"),
        ("id" = i64, Path, description = "Item id")
    ),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 400, description = "Caller is not the owner"),
        (status = 404, description = "Item or user not found")
    )
)]
async fn update_item(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Json<ItemResponse>, AppError> {
    let update_data = payload.into_update_item();
    let item = state
        .services
        .items
        .update_item(user_id, id, update_data)
        .await?;
    Ok(Json(ItemResponse::from(item)))
}

/// GET /items/{id} - Item with comments
///
/// The owner additionally sees the last started and next upcoming
/// approved bookings.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = ITEM_TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user id"),
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemDetailsResponse),
        (status = 404, description = "Item not found")
    )
)]
async fn get_item(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> Result<Json<ItemDetailsResponse>, AppError> {
    let details = state.services.items.get_item(id, user_id).await?;
    Ok(Json(ItemDetailsResponse::from(details)))
}

/// GET /items - All items of the calling owner
#[utoipa::path(
    get,
    path = "/",
    tag = ITEM_TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Acting user id")),
    responses(
        (status = 200, description = "The caller's items", body = Vec<ItemResponse>)
    )
)]
async fn list_owner_items(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
) -> Result<Json<Vec<ItemResponse>>, AppError> {
    let items = state.services.items.get_items_for_owner(user_id).await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// GET /items/search?text= - Search available items by name or description
#[utoipa::path(
    get,
    path = "/search",
    tag = ITEM_TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user id"),
        SearchQuery
    ),
    responses(
        (status = 200, description = "Matching available items", body = Vec<ItemResponse>)
    )
)]
async fn search_items(
    State(state): State<AppState>,
    SharerId(_user_id): SharerId,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ItemResponse>>, AppError> {
    let items = state.services.items.search_items(&query.text).await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// POST /items/{id}/comment - Comment on an item after a completed booking
#[utoipa::path(
    post,
    path = "/{id}/comment",
    tag = ITEM_TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user id"),
        ("id" = i64, Path, description = "Item id")
    ),
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "Comment added", body = CommentResponse),
        (status = 400, description = "No completed booking of this item"),
        (status = 404, description = "Item or user not found")
    )
)]
async fn add_comment(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    let comment = state
        .services
        .items
        .add_comment(user_id, id, payload.text)
        .await?;
    Ok(Json(CommentResponse::from(comment)))
}
