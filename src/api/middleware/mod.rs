//! Middleware components for request processing.
//!
//! Logging, request ID tracking, error mapping, and the shared-user
//! header extractor.

mod error_handler;
mod logging;
mod request_id;
mod sharer;

pub use error_handler::error_to_status_code;
pub use logging::logging_middleware;
pub use request_id::{RequestId, request_id_middleware};
pub use sharer::{SHARER_USER_HEADER, SharerId};
