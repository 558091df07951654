//! Booking service: creation, the approval state machine, and the
//! time-windowed listing queries.

use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{Booking, BookingSearchState, BookingStatus, Item, NewBooking};
use crate::repositories::{BookingRepository, ItemRepository, UserRepository};
use crate::utils::time;

/// Checks that an item can be booked by the given user.
///
/// The item must be available, and owners cannot book their own items.
fn ensure_bookable(item: &Item, booker_id: i64) -> AppResult<()> {
    if !item.available {
        return Err(AppError::validation(
            "item",
            "Item is not available for booking",
        ));
    }
    if item.owner_id == booker_id {
        return Err(AppError::validation(
            "item",
            "Owners cannot book their own items",
        ));
    }
    Ok(())
}

/// Decides the new status of a booking, enforcing the approval rules.
///
/// Only the item's owner may decide, and only while the booking is still
/// WAITING; APPROVED and REJECTED are terminal.
fn decide_status(
    booking: &Booking,
    item: &Item,
    caller_id: i64,
    approved: bool,
) -> AppResult<BookingStatus> {
    if item.owner_id != caller_id {
        return Err(AppError::validation(
            "owner",
            "Only the item's owner may approve or reject a booking",
        ));
    }
    if booking.status != BookingStatus::Waiting {
        return Err(AppError::validation(
            "status",
            "Booking has already been decided",
        ));
    }
    Ok(if approved {
        BookingStatus::Approved
    } else {
        BookingStatus::Rejected
    })
}

/// Checks that the caller is a party to the booking: its booker or the
/// owner of the booked item.
fn ensure_party(booking: &Booking, item: &Item, caller_id: i64) -> AppResult<()> {
    if booking.booker_id != caller_id && item.owner_id != caller_id {
        return Err(AppError::validation(
            "caller",
            "Caller is neither the booker nor the item's owner",
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct BookingService {
    bookings: BookingRepository,
    users: UserRepository,
    items: ItemRepository,
}

impl BookingService {
    pub fn new(
        bookings: BookingRepository,
        users: UserRepository,
        items: ItemRepository,
    ) -> Self {
        Self {
            bookings,
            users,
            items,
        }
    }

    /// Creates a booking in WAITING state.
    ///
    /// Fails with NotFound if the booker or item is missing, and with
    /// Validation if the item is unavailable or the booker owns the item.
    pub async fn create_booking(
        &self,
        booker_id: i64,
        item_id: i64,
        start_date: jiff::civil::DateTime,
        end_date: jiff::civil::DateTime,
    ) -> AppResult<Booking> {
        use jiff_diesel::ToDiesel;

        self.users
            .find_by_id(booker_id)
            .await?
            .ok_or_else(|| AppError::not_found("user", booker_id))?;
        let item = self
            .items
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::not_found("item", item_id))?;

        if let Err(e) = ensure_bookable(&item, booker_id) {
            warn!(item_id, booker_id, "Rejected booking request");
            return Err(e);
        }

        self.bookings
            .create(NewBooking {
                start_date: start_date.to_diesel(),
                end_date: end_date.to_diesel(),
                status: BookingStatus::Waiting,
                booker_id,
                item_id,
            })
            .await
    }

    /// Approves or rejects a WAITING booking, as decided by the item owner.
    pub async fn update_booking_status(
        &self,
        caller_id: i64,
        booking_id: i64,
        approved: bool,
    ) -> AppResult<Booking> {
        let booking = self.require_booking(booking_id).await?;
        let item = self
            .items
            .find_by_id(booking.item_id)
            .await?
            .ok_or_else(|| AppError::not_found("item", booking.item_id))?;

        let new_status = match decide_status(&booking, &item, caller_id, approved) {
            Ok(status) => status,
            Err(e) => {
                warn!(caller_id, booking_id, "Rejected status change");
                return Err(e);
            }
        };

        info!(booking_id, ?new_status, "Booking status changed");
        self.bookings.update_status(booking_id, new_status).await
    }

    /// Fetches a booking; visible only to the booker and the item's owner.
    pub async fn get_booking(&self, caller_id: i64, booking_id: i64) -> AppResult<Booking> {
        let booking = self.require_booking(booking_id).await?;
        let item = self
            .items
            .find_by_id(booking.item_id)
            .await?
            .ok_or_else(|| AppError::not_found("item", booking.item_id))?;

        ensure_party(&booking, &item, caller_id)?;
        Ok(booking)
    }

    /// Bookings made by the user, filtered by state, newest start first.
    pub async fn get_bookings_for_renter(
        &self,
        user_id: i64,
        state: &str,
    ) -> AppResult<Vec<Booking>> {
        let state: BookingSearchState = state.parse()?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user", user_id))?;
        self.bookings
            .find_for_booker(user_id, state, time::now_db())
            .await
    }

    /// Bookings on the user's items, filtered by state, newest start first.
    /// Fails with NotFound when the user has no items at all.
    pub async fn get_bookings_for_owner(
        &self,
        user_id: i64,
        state: &str,
    ) -> AppResult<Vec<Booking>> {
        let state: BookingSearchState = state.parse()?;
        if !self.items.owner_has_items(user_id).await? {
            return Err(AppError::NotFound {
                entity: "items".to_string(),
                field: "owner_id".to_string(),
                value: user_id.to_string(),
            });
        }
        self.bookings
            .find_for_owner(user_id, state, time::now_db())
            .await
    }

    async fn require_booking(&self, booking_id: i64) -> AppResult<Booking> {
        self.bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("booking", booking_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: i64 = 1;
    const BOOKER: i64 = 2;
    const STRANGER: i64 = 3;

    fn item(available: bool) -> Item {
        Item {
            id: 10,
            name: "Drill".to_string(),
            description: "Cordless drill".to_string(),
            available,
            owner_id: OWNER,
            request_id: None,
        }
    }

    fn booking(status: BookingStatus) -> Booking {
        Booking {
            id: 20,
            start_date: time::now_db(),
            end_date: time::now_db(),
            status,
            booker_id: BOOKER,
            item_id: 10,
        }
    }

    fn assert_validation(result: AppResult<impl std::fmt::Debug>) {
        match result {
            Err(AppError::Validation { .. }) => {}
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_available_item_is_bookable_by_non_owner() {
        assert!(ensure_bookable(&item(true), BOOKER).is_ok());
    }

    #[test]
    fn test_unavailable_item_is_not_bookable() {
        assert_validation(ensure_bookable(&item(false), BOOKER));
    }

    #[test]
    fn test_owner_cannot_book_own_item() {
        assert_validation(ensure_bookable(&item(true), OWNER));
    }

    #[test]
    fn test_owner_approves_waiting_booking() {
        let status = decide_status(&booking(BookingStatus::Waiting), &item(true), OWNER, true);
        assert_eq!(status.unwrap(), BookingStatus::Approved);
    }

    #[test]
    fn test_owner_rejects_waiting_booking() {
        let status = decide_status(&booking(BookingStatus::Waiting), &item(true), OWNER, false);
        assert_eq!(status.unwrap(), BookingStatus::Rejected);
    }

    #[test]
    fn test_non_owner_cannot_decide_booking() {
        assert_validation(decide_status(
            &booking(BookingStatus::Waiting),
            &item(true),
            BOOKER,
            true,
        ));
    }

    #[test]
    fn test_approved_booking_cannot_be_decided_again() {
        assert_validation(decide_status(
            &booking(BookingStatus::Approved),
            &item(true),
            OWNER,
            false,
        ));
    }

    #[test]
    fn test_rejected_booking_cannot_be_approved() {
        assert_validation(decide_status(
            &booking(BookingStatus::Rejected),
            &item(true),
            OWNER,
            true,
        ));
    }

    #[test]
    fn test_booker_and_owner_may_view_booking() {
        let b = booking(BookingStatus::Waiting);
        let i = item(true);
        assert!(ensure_party(&b, &i, BOOKER).is_ok());
        assert!(ensure_party(&b, &i, OWNER).is_ok());
    }

    #[test]
    fn test_stranger_may_not_view_booking() {
        assert_validation(ensure_party(
            &booking(BookingStatus::Waiting),
            &item(true),
            STRANGER,
        ));
    }
}
