//! Booking repository for async database operations.
//!
//! Besides plain CRUD this hosts the time-windowed listing queries behind
//! the CURRENT/PAST/FUTURE booking states, for both the renter and the
//! owner perspective.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff_diesel::DateTime;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{Booking, BookingSearchState, BookingStatus, NewBooking};
use crate::schema::{bookings, items};

#[derive(Clone)]
pub struct BookingRepository {
    pool: AsyncDbPool,
}

impl BookingRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_booking: NewBooking) -> AppResult<Booking> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(bookings::table)
            .values(&new_booking)
            .returning(Booking::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(&self, booking_id: i64) -> AppResult<Option<Booking>> {
        let mut conn = self.pool.get().await?;

        bookings::table
            .filter(bookings::id.eq(booking_id))
            .select(Booking::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(Into::into)
    }

    pub async fn update_status(
        &self,
        booking_id: i64,
        new_status: BookingStatus,
    ) -> AppResult<Booking> {
        let mut conn = self.pool.get().await?;

        diesel::update(bookings::table.filter(bookings::id.eq(booking_id)))
            .set(bookings::status.eq(new_status))
            .returning(Booking::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(Into::into)
    }

    /// Bookings made by the given user, filtered by state, newest start first.
    pub async fn find_for_booker(
        &self,
        uid: i64,
        state: BookingSearchState,
        now: DateTime,
    ) -> AppResult<Vec<Booking>> {
        let mut conn = self.pool.get().await?;

        let mut query = bookings::table
            .filter(bookings::booker_id.eq(uid))
            .into_boxed();
        query = Self::apply_state_filter(query, state, now);

        query
            .order(bookings::start_date.desc())
            .select(Booking::as_select())
            .load(&mut conn)
            .await
            .map_err(Into::into)
    }

    /// Bookings on any item owned by the given user, filtered by state,
    /// newest start first.
    pub async fn find_for_owner(
        &self,
        uid: i64,
        state: BookingSearchState,
        now: DateTime,
    ) -> AppResult<Vec<Booking>> {
        let mut conn = self.pool.get().await?;

        let owned_items = items::table
            .filter(items::owner_id.eq(uid))
            .select(items::id);
        let mut query = bookings::table
            .filter(bookings::item_id.eq_any(owned_items))
            .into_boxed();
        query = Self::apply_state_filter(query, state, now);

        query
            .order(bookings::start_date.desc())
            .select(Booking::as_select())
            .load(&mut conn)
            .await
            .map_err(Into::into)
    }

    /// All bookings of an item by a given user, regardless of status.
    pub async fn find_for_booker_and_item(&self, uid: i64, iid: i64) -> AppResult<Vec<Booking>> {
        let mut conn = self.pool.get().await?;

        bookings::table
            .filter(bookings::booker_id.eq(uid))
            .filter(bookings::item_id.eq(iid))
            .select(Booking::as_select())
            .load(&mut conn)
            .await
            .map_err(Into::into)
    }

    /// The most recent APPROVED booking of an item that has already started.
    pub async fn find_last_for_item(
        &self,
        iid: i64,
        now: DateTime,
    ) -> AppResult<Option<Booking>> {
        let mut conn = self.pool.get().await?;

        bookings::table
            .filter(bookings::item_id.eq(iid))
            .filter(bookings::status.eq(BookingStatus::Approved))
            .filter(bookings::start_date.lt(now))
            .order(bookings::start_date.desc())
            .select(Booking::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(Into::into)
    }

    /// The next upcoming APPROVED booking of an item.
    pub async fn find_next_for_item(
        &self,
        iid: i64,
        now: DateTime,
    ) -> AppResult<Option<Booking>> {
        let mut conn = self.pool.get().await?;

        bookings::table
            .filter(bookings::item_id.eq(iid))
            .filter(bookings::status.eq(BookingStatus::Approved))
            .filter(bookings::start_date.gt(now))
            .order(bookings::start_date.asc())
            .select(Booking::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(Into::into)
    }

    fn apply_state_filter<'a>(
        query: bookings::BoxedQuery<'a, diesel::pg::Pg>,
        state: BookingSearchState,
        now: DateTime,
    ) -> bookings::BoxedQuery<'a, diesel::pg::Pg> {
        match state {
            BookingSearchState::All => query,
            BookingSearchState::Waiting => {
                query.filter(bookings::status.eq(BookingStatus::Waiting))
            }
            BookingSearchState::Rejected => {
                query.filter(bookings::status.eq(BookingStatus::Rejected))
            }
            BookingSearchState::Current => query
                .filter(bookings::start_date.le(now.clone()))
                .filter(bookings::end_date.ge(now)),
            BookingSearchState::Past => query.filter(bookings::end_date.lt(now)),
            BookingSearchState::Future => query.filter(bookings::start_date.gt(now)),
        }
    }
}
