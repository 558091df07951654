//! Item request handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::REQUEST_TAG;
use crate::api::dto::{CreateItemRequestDto, ItemRequestResponse, ItemResponse};
use crate::api::middleware::SharerId;
use crate::error::AppError;
use crate::state::AppState;

/// Creates item-request routes.
///
/// Routes:
/// - POST /                 - Post a new request
/// - GET /                  - Caller's own requests, newest first
/// - GET /all?from=&size=   - Other users' requests, paginated
/// - GET /{id}              - Single request with its items
pub fn request_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_request, list_own_requests))
        .routes(routes!(list_all_requests))
        .routes(routes!(get_request))
}

fn default_size() -> i64 {
    10
}

#[derive(Debug, Deserialize, IntoParams)]
struct PageQuery {
    /// Offset of the first request to return
    #[serde(default)]
    from: i64,
    /// Maximum number of requests to return
    #[serde(default = "default_size")]
    size: i64,
}

/// POST /requests - Post a new item request
#[utoipa::path(
    post,
    path = "/",
    tag = REQUEST_TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Acting user id")),
    request_body = CreateItemRequestDto,
    responses(
        (status = 201, description = "Request posted", body = ItemRequestResponse),
        (status = 404, description = "User not found")
    )
)]
async fn create_request(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    Json(payload): Json<CreateItemRequestDto>,
) -> Result<(StatusCode, Json<ItemRequestResponse>), AppError> {
    let request = state
        .services
        .requests
        .create_request(user_id, payload.description)
        .await?;
    let response = ItemRequestResponse {
        id: request.id,
        description: request.description,
        created: request.created.to_jiff(),
        items: Vec::<ItemResponse>::new(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /requests - Caller's own requests with their answering items
#[utoipa::path(
    get,
    path = "/",
    tag = REQUEST_TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Acting user id")),
    responses(
        (status = 200, description = "The caller's requests", body = Vec<ItemRequestResponse>),
        (status = 404, description = "User not found")
    )
)]
async fn list_own_requests(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
) -> Result<Json<Vec<ItemRequestResponse>>, AppError> {
    let requests = state.services.requests.get_own_requests(user_id).await?;
    Ok(Json(
        requests.into_iter().map(ItemRequestResponse::from).collect(),
    ))
}

/// GET /requests/all?from=&size= - Other users' requests, newest first
#[utoipa::path(
    get,
    path = "/all",
    tag = REQUEST_TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user id"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Other users' requests", body = Vec<ItemRequestResponse>),
        (status = 400, description = "Invalid pagination"),
        (status = 404, description = "User not found")
    )
)]
async fn list_all_requests(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<ItemRequestResponse>>, AppError> {
    let requests = state
        .services
        .requests
        .get_all_requests(user_id, query.from, query.size)
        .await?;
    Ok(Json(
        requests.into_iter().map(ItemRequestResponse::from).collect(),
    ))
}

/// GET /requests/{id} - Single request with its answering items
#[utoipa::path(
    get,
    path = "/{id}",
    tag = REQUEST_TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user id"),
        ("id" = i64, Path, description = "Request id")
    ),
    responses(
        (status = 200, description = "Request found", body = ItemRequestResponse),
        (status = 404, description = "Request or user not found")
    )
)]
async fn get_request(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> Result<Json<ItemRequestResponse>, AppError> {
    let request = state.services.requests.get_request(user_id, id).await?;
    Ok(Json(ItemRequestResponse::from(request)))
}
