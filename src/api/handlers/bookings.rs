//! Booking request handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::BOOKING_TAG;
use crate::api::dto::{BookingResponse, CreateBookingRequest};
use crate::api::middleware::SharerId;
use crate::error::AppError;
use crate::state::AppState;

/// Creates booking-related routes.
///
/// Routes:
/// - POST /                  - Request a booking (status WAITING)
/// - PATCH /{id}?approved=   - Owner approves or rejects
/// - GET /{id}               - Booking by id (booker or owner only)
/// - GET /?state=            - Caller's bookings as renter
/// - GET /owner?state=       - Bookings of the caller's items
pub fn booking_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_booking, list_renter_bookings))
        .routes(routes!(list_owner_bookings))
        .routes(routes!(get_booking, update_booking_status))
}

fn default_state() -> String {
    "ALL".to_string()
}

#[derive(Debug, Deserialize, IntoParams)]
struct StateQuery {
    /// ALL, CURRENT, PAST, FUTURE, WAITING or REJECTED
    #[serde(default = "default_state")]
    state: String,
}

#[derive(Debug, Deserialize, IntoParams)]
struct ApprovedQuery {
    /// true approves the booking, false rejects it
    approved: bool,
}

/// POST /bookings - Request a booking of an item
#[utoipa::path(
    post,
    path = "/",
    tag = BOOKING_TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Acting user id")),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking requested", body = BookingResponse),
        (status = 400, description = "Item unavailable or booked by its owner"),
        (status = 404, description = "Item or user not found")
    )
)]
async fn create_booking(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let booking = state
        .services
        .bookings
        .create_booking(user_id, payload.item_id, payload.start, payload.end)
        .await?;
    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// PATCH /bookings/{id}?approved= - Approve or reject a waiting booking
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = BOOKING_TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user id"),
        ("id" = i64, Path, description = "Booking id"),
        ApprovedQuery
    ),
    responses(
        (status = 200, description = "Booking decided", body = BookingResponse),
        (status = 400, description = "Caller is not the owner, or already decided"),
        (status = 404, description = "Booking not found")
    )
)]
async fn update_booking_status(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    Query(query): Query<ApprovedQuery>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state
        .services
        .bookings
        .update_booking_status(user_id, id, query.approved)
        .await?;
    Ok(Json(BookingResponse::from(booking)))
}

/// GET /bookings/{id} - Booking by id, visible to its booker or the item owner
#[utoipa::path(
    get,
    path = "/{id}",
    tag = BOOKING_TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user id"),
        ("id" = i64, Path, description = "Booking id")
    ),
    responses(
        (status = 200, description = "Booking found", body = BookingResponse),
        (status = 400, description = "Caller is neither booker nor owner"),
        (status = 404, description = "Booking not found")
    )
)]
async fn get_booking(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.services.bookings.get_booking(user_id, id).await?;
    Ok(Json(BookingResponse::from(booking)))
}

/// GET /bookings?state= - Caller's bookings as renter, newest start first
#[utoipa::path(
    get,
    path = "/",
    tag = BOOKING_TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user id"),
        StateQuery
    ),
    responses(
        (status = 200, description = "The caller's bookings", body = Vec<BookingResponse>),
        (status = 400, description = "Unknown state filter"),
        (status = 404, description = "User not found")
    )
)]
async fn list_renter_bookings(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let bookings = state
        .services
        .bookings
        .get_bookings_for_renter(user_id, &query.state)
        .await?;
    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}

/// GET /bookings/owner?state= - Bookings of the caller's items
#[utoipa::path(
    get,
    path = "/owner",
    tag = BOOKING_TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user id"),
        StateQuery
    ),
    responses(
        (status = 200, description = "Bookings of the caller's items", body = Vec<BookingResponse>),
        (status = 400, description = "Unknown state filter"),
        (status = 404, description = "Caller owns no items")
    )
)]
async fn list_owner_bookings(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let bookings = state
        .services
        .bookings
        .get_bookings_for_owner(user_id, &query.state)
        .await?;
    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}
