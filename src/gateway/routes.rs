//! Router configuration for the gateway.

use axum::{Router, middleware, routing::get, routing::post};

use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::gateway::{GatewayState, handlers};

/// Creates the gateway router mirroring the backend surface.
pub fn create_gateway_router(state: GatewayState) -> Router {
    let users = Router::new()
        .route("/", post(handlers::create_user))
        .route(
            "/{id}",
            get(handlers::get_user)
                .patch(handlers::update_user)
                .delete(handlers::delete_user),
        );

    let items = Router::new()
        .route(
            "/",
            post(handlers::create_item).get(handlers::list_owner_items),
        )
        .route("/{id}", get(handlers::get_item).patch(handlers::update_item))
        .route("/search", get(handlers::search_items))
        .route("/{id}/comment", post(handlers::add_comment));

    let bookings = Router::new()
        .route(
            "/",
            post(handlers::create_booking).get(handlers::list_renter_bookings),
        )
        .route("/owner", get(handlers::list_owner_bookings))
        .route(
            "/{id}",
            get(handlers::get_booking).patch(handlers::update_booking_status),
        );

    let requests = Router::new()
        .route(
            "/",
            post(handlers::create_request).get(handlers::list_own_requests),
        )
        .route("/all", get(handlers::list_all_requests))
        .route("/{id}", get(handlers::get_request));

    Router::new()
        .nest("/users", users)
        .nest("/items", items)
        .nest("/bookings", bookings)
        .nest("/requests", requests)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
