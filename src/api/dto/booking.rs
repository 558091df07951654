//! Booking DTOs for API requests and responses.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::{Booking, BookingStatus};
use crate::utils::time;

/// Request body for creating a booking.
///
/// Timestamps are ISO 8601 civil datetimes, e.g. `2026-09-01T12:00:00`.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_booking_window))]
pub struct CreateBookingRequest {
    pub item_id: i64,
    #[schema(value_type = String, format = DateTime)]
    pub start: DateTime,
    #[schema(value_type = String, format = DateTime)]
    pub end: DateTime,
}

fn validate_booking_window(req: &CreateBookingRequest) -> Result<(), ValidationError> {
    if req.start >= req.end {
        return Err(ValidationError::new("booking_window")
            .with_message("Booking start must be before its end".into()));
    }
    if req.start < time::now() {
        return Err(ValidationError::new("booking_window")
            .with_message("Booking start must not be in the past".into()));
    }
    Ok(())
}

/// Response body for booking data.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: i64,
    #[schema(value_type = String, format = DateTime)]
    pub start: DateTime,
    #[schema(value_type = String, format = DateTime)]
    pub end: DateTime,
    pub status: BookingStatus,
    pub item_id: i64,
    pub booker_id: i64,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            start: booking.start_date.to_jiff(),
            end: booking.end_date.to_jiff(),
            status: booking.status,
            item_id: booking.item_id,
            booker_id: booking.booker_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::ToSpan;

    fn request(start: DateTime, end: DateTime) -> CreateBookingRequest {
        CreateBookingRequest {
            item_id: 1,
            start,
            end,
        }
    }

    #[test]
    fn test_future_window_passes_validation() {
        let start = time::now().checked_add(1.hour()).unwrap();
        let end = start.checked_add(2.hours()).unwrap();
        assert!(request(start, end).validate().is_ok());
    }

    #[test]
    fn test_inverted_window_fails_validation() {
        let start = time::now().checked_add(3.hours()).unwrap();
        let end = start.checked_sub(1.hour()).unwrap();
        assert!(request(start, end).validate().is_err());
    }

    #[test]
    fn test_past_start_fails_validation() {
        let start = time::now().checked_sub(2.hours()).unwrap();
        let end = time::now().checked_add(2.hours()).unwrap();
        assert!(request(start, end).validate().is_err());
    }

    #[test]
    fn test_booking_response_flattens_fields() {
        let json = serde_json::json!({
            "id": 5,
            "start": "2026-09-01T12:00:00",
            "end": "2026-09-02T12:00:00",
            "status": "WAITING",
            "itemId": 2,
            "bookerId": 9
        });
        let response: BookingResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.item_id, 2);
        assert_eq!(response.booker_id, 9);
        assert_eq!(response.status, BookingStatus::Waiting);
    }
}
