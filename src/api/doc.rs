use utoipa::OpenApi;

pub const USER_TAG: &str = "Users";
pub const ITEM_TAG: &str = "Items";
pub const BOOKING_TAG: &str = "Bookings";
pub const REQUEST_TAG: &str = "Requests";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ShareIt",
        description = "A peer-to-peer item sharing service",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::UserResponse,
            crate::api::dto::ItemResponse,
            crate::api::dto::ItemDetailsResponse,
            crate::api::dto::BookingResponse,
            crate::api::dto::CommentResponse,
            crate::api::dto::ItemRequestResponse,
        )
    ),
    tags(
        (name = USER_TAG, description = "User management endpoints"),
        (name = ITEM_TAG, description = "Item listing and search endpoints"),
        (name = BOOKING_TAG, description = "Booking lifecycle endpoints"),
        (name = REQUEST_TAG, description = "Item request endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
