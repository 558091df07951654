//! Application state for the Axum backend.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the database connection pool, used by health checks
    pub db_pool: AsyncDbPool,
}

impl AppState {
    /// Creates a new AppState from a database connection pool.
    ///
    /// Initializes all repositories and services from the provided pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        let repos = Repositories::new(pool.clone());
        let services = Services::new(repos);
        Self {
            services,
            db_pool: pool,
        }
    }
}
