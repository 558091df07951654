use std::str::FromStr;

use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use jiff_diesel::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Lifecycle status of a booking.
///
/// APPROVED and REJECTED are terminal; transitions are only permitted
/// out of WAITING, by the item's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DbEnum, Serialize, Deserialize, ToSchema)]
#[db_enum(existing_type_path = "crate::schema::sql_types::BookingStatus")]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

/// Booking model for reading from database
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Booking {
    pub id: i64,
    pub start_date: DateTime,
    pub end_date: DateTime,
    pub status: BookingStatus,
    pub booker_id: i64,
    pub item_id: i64,
}

/// NewBooking model for inserting new records
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::bookings)]
pub struct NewBooking {
    pub start_date: DateTime,
    pub end_date: DateTime,
    pub status: BookingStatus,
    pub booker_id: i64,
    pub item_id: i64,
}

/// Time-window filter used by the booking listing endpoints.
///
/// CURRENT means `start <= now <= end`, PAST means `end < now`,
/// FUTURE means `start > now`; WAITING and REJECTED filter by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingSearchState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl FromStr for BookingSearchState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(BookingSearchState::All),
            "CURRENT" => Ok(BookingSearchState::Current),
            "PAST" => Ok(BookingSearchState::Past),
            "FUTURE" => Ok(BookingSearchState::Future),
            "WAITING" => Ok(BookingSearchState::Waiting),
            "REJECTED" => Ok(BookingSearchState::Rejected),
            other => Err(AppError::Validation {
                field: "state".to_string(),
                reason: format!("Unknown booking state '{}'", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_state_parses_known_values() {
        assert_eq!("ALL".parse::<BookingSearchState>().unwrap(), BookingSearchState::All);
        assert_eq!(
            "CURRENT".parse::<BookingSearchState>().unwrap(),
            BookingSearchState::Current
        );
        assert_eq!(
            "REJECTED".parse::<BookingSearchState>().unwrap(),
            BookingSearchState::Rejected
        );
    }

    #[test]
    fn test_search_state_rejects_unknown_value() {
        let err = "SOMEDAY".parse::<BookingSearchState>().unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field, "state"),
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_search_state_is_case_sensitive() {
        assert!("all".parse::<BookingSearchState>().is_err());
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&BookingStatus::Waiting).unwrap();
        assert_eq!(json, "\"WAITING\"");
    }
}
