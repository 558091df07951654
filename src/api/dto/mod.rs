//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - User request/response DTOs
//! - `item` - Item and comment request/response DTOs
//! - `booking` - Booking request/response DTOs
//! - `request` - Item-request request/response DTOs
//! - `error` - Common error response DTOs
//!
//! Request DTOs carry `validator` annotations; the backend deserializes
//! them as-is while the gateway additionally runs the validations before
//! forwarding.

mod booking;
mod error;
mod item;
mod request;
mod user;

pub use booking::{BookingResponse, CreateBookingRequest};
pub use error::ErrorResponse;
pub use item::{
    CommentResponse, CreateCommentRequest, CreateItemRequest, ItemDetailsResponse, ItemResponse,
    UpdateItemRequest,
};
pub use request::{CreateItemRequestDto, ItemRequestResponse};
pub use user::{CreateUserRequest, UpdateUserRequest, UserResponse};
