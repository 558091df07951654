//! API module for HTTP handlers, middleware, and DTOs.
//!
//! This module provides the backend HTTP layer: request handlers,
//! middleware components, and data transfer objects shared with the
//! gateway.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
mod doc;
