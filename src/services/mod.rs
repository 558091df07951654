//! Service layer for business logic operations.
//!
//! Services encapsulate business rules and coordinate between
//! repositories and handlers.

mod booking_service;
mod item_service;
mod request_service;
mod user_service;

pub use booking_service::BookingService;
pub use item_service::{ItemDetails, ItemService};
pub use request_service::{EnrichedRequest, ItemRequestService};
pub use user_service::UserService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub items: ItemService,
    pub bookings: BookingService,
    pub requests: ItemRequestService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            users: UserService::new(repos.users.clone()),
            items: ItemService::new(
                repos.items.clone(),
                repos.users.clone(),
                repos.bookings.clone(),
                repos.comments.clone(),
            ),
            bookings: BookingService::new(
                repos.bookings.clone(),
                repos.users.clone(),
                repos.items.clone(),
            ),
            requests: ItemRequestService::new(repos.requests, repos.users, repos.items),
        }
    }
}
