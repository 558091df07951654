//! Repository layer for data access operations.
//!
//! Provides async CRUD operations for all domain entities.

mod booking_repo;
mod comment_repo;
mod item_repo;
mod request_repo;
mod user_repo;

pub use booking_repo::BookingRepository;
pub use comment_repo::CommentRepository;
pub use item_repo::ItemRepository;
pub use request_repo::ItemRequestRepository;
pub use user_repo::UserRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub items: ItemRepository,
    pub bookings: BookingRepository,
    pub comments: CommentRepository,
    pub requests: ItemRequestRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            items: ItemRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool.clone()),
            comments: CommentRepository::new(pool.clone()),
            requests: ItemRequestRepository::new(pool),
        }
    }
}
