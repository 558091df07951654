//! User CRUD request handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates user-related routes.
///
/// Routes:
/// - POST /        - Create a new user
/// - GET /{id}     - Get user by ID
/// - PATCH /{id}   - Partially update user by ID
/// - DELETE /{id}  - Delete user by ID
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_user))
        .routes(routes!(get_user, update_user, delete_user))
}

/// POST /users - Create new user
///
/// Returns 201 Created with the created user data, 409 on duplicate email.
#[utoipa::path(
    post,
    path = "/",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 409, description = "Email already in use")
    )
)]
async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let new_user = payload.into_new_user();
    let user = state.services.users.create_user(new_user).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /users/{id} - Get user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.services.users.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PATCH /users/{id} - Partially update user
///
/// Absent fields keep their current value.
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    )
)]
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let update_data = payload.into_update_user();
    let user = state.services.users.update_user(id, update_data).await?;
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /users/{id} - Delete user
///
/// Returns 204 No Content on success, 404 if the user does not exist.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.services.users.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
