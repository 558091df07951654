//! Item service: listing CRUD, search, and the comment subsystem.

use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::models::{Booking, BookingStatus, Comment, Item, NewComment, NewItem, UpdateItem};
use crate::repositories::{BookingRepository, CommentRepository, ItemRepository, UserRepository};
use crate::utils::time;

/// An item together with its read-time enrichments: all comments (with
/// author names), and for the owner's eyes only, the last started and next
/// upcoming approved bookings.
#[derive(Debug)]
pub struct ItemDetails {
    pub item: Item,
    pub comments: Vec<(Comment, String)>,
    pub last_booking: Option<Booking>,
    pub next_booking: Option<Booking>,
}

/// True when the booking counts as a completed rental: it was APPROVED
/// and its end lies in the past. Only completed rentals entitle the
/// booker to comment on the item.
fn rental_completed(booking: &Booking, now: jiff::civil::DateTime) -> bool {
    booking.status == BookingStatus::Approved && booking.end_date.clone().to_jiff() < now
}

#[derive(Clone)]
pub struct ItemService {
    items: ItemRepository,
    users: UserRepository,
    bookings: BookingRepository,
    comments: CommentRepository,
}

impl ItemService {
    pub fn new(
        items: ItemRepository,
        users: UserRepository,
        bookings: BookingRepository,
        comments: CommentRepository,
    ) -> Self {
        Self {
            items,
            users,
            bookings,
            comments,
        }
    }

    /// Creates an item for the given owner; NotFound if the owner is missing.
    pub async fn create_item(&self, owner_id: i64, mut new_item: NewItem) -> AppResult<Item> {
        self.require_user(owner_id).await?;
        new_item.owner_id = owner_id;
        self.items.create(new_item).await
    }

    /// Partially updates an item. Only the owner may change an item.
    pub async fn update_item(
        &self,
        user_id: i64,
        item_id: i64,
        update_data: UpdateItem,
    ) -> AppResult<Item> {
        self.require_user(user_id).await?;
        let item = self.require_item(item_id).await?;

        if item.owner_id != user_id {
            warn!(user_id, item_id, "Rejected item update by non-owner");
            return Err(AppError::validation(
                "owner",
                "Only the item's owner may change it",
            ));
        }

        if update_data.name.is_none()
            && update_data.description.is_none()
            && update_data.available.is_none()
        {
            return Ok(item);
        }
        self.items.update(item_id, update_data).await
    }

    /// Fetches an item with its comments. Booking enrichment (last/next
    /// approved booking) is only revealed to the item's owner.
    pub async fn get_item(&self, item_id: i64, caller_id: i64) -> AppResult<ItemDetails> {
        let item = self.require_item(item_id).await?;
        let comments = self.comments.find_by_item_id(item_id).await?;

        let (last_booking, next_booking) = if item.owner_id == caller_id {
            let now = time::now_db();
            (
                self.bookings.find_last_for_item(item_id, now.clone()).await?,
                self.bookings.find_next_for_item(item_id, now).await?,
            )
        } else {
            (None, None)
        };

        Ok(ItemDetails {
            item,
            comments,
            last_booking,
            next_booking,
        })
    }

    /// All items listed by the given user.
    pub async fn get_items_for_owner(&self, owner_id: i64) -> AppResult<Vec<Item>> {
        self.items.find_by_owner(owner_id).await
    }

    /// Substring search over available items; blank text yields nothing.
    pub async fn search_items(&self, text: &str) -> AppResult<Vec<Item>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.items.search(text).await
    }

    /// Adds a comment. The author must have at least one completed rental
    /// of the item.
    pub async fn add_comment(
        &self,
        user_id: i64,
        item_id: i64,
        text: String,
    ) -> AppResult<(Comment, String)> {
        let user = self.require_user(user_id).await?;
        self.require_item(item_id).await?;

        let now = time::now();
        let rentals = self
            .bookings
            .find_for_booker_and_item(user_id, item_id)
            .await?;
        if !rentals.iter().any(|b| rental_completed(b, now)) {
            warn!(user_id, item_id, "Rejected comment without completed booking");
            return Err(AppError::validation(
                "booking",
                "User has not rented this item, or the booking is not finished yet",
            ));
        }

        let comment = self
            .comments
            .create(NewComment {
                text,
                item_id,
                author_id: user_id,
                created: time::now_db(),
            })
            .await?;
        Ok((comment, user.name))
    }

    async fn require_user(&self, user_id: i64) -> AppResult<crate::models::User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user", user_id))
    }

    async fn require_item(&self, item_id: i64) -> AppResult<Item> {
        self.items
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::not_found("item", item_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::ToSpan;
    use jiff_diesel::ToDiesel;

    fn booking(status: BookingStatus, ends_in_hours: i64) -> Booking {
        let now = time::now();
        let end = if ends_in_hours >= 0 {
            now.checked_add(ends_in_hours.hours()).unwrap()
        } else {
            now.checked_sub((-ends_in_hours).hours()).unwrap()
        };
        let start = end.checked_sub(24.hours()).unwrap();
        Booking {
            id: 1,
            start_date: start.to_diesel(),
            end_date: end.to_diesel(),
            status,
            booker_id: 2,
            item_id: 10,
        }
    }

    #[test]
    fn test_finished_approved_booking_permits_comment() {
        assert!(rental_completed(
            &booking(BookingStatus::Approved, -1),
            time::now()
        ));
    }

    #[test]
    fn test_ongoing_approved_booking_does_not_permit_comment() {
        assert!(!rental_completed(
            &booking(BookingStatus::Approved, 1),
            time::now()
        ));
    }

    #[test]
    fn test_waiting_booking_does_not_permit_comment() {
        assert!(!rental_completed(
            &booking(BookingStatus::Waiting, -1),
            time::now()
        ));
    }

    #[test]
    fn test_rejected_booking_does_not_permit_comment() {
        assert!(!rental_completed(
            &booking(BookingStatus::Rejected, -1),
            time::now()
        ));
    }
}
