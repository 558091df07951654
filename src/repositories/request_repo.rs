//! Item request repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{ItemRequest, NewItemRequest};

#[derive(Clone)]
pub struct ItemRequestRepository {
    pool: AsyncDbPool,
}

impl ItemRequestRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_request: NewItemRequest) -> AppResult<ItemRequest> {
        use crate::schema::item_requests::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(item_requests)
            .values(&new_request)
            .returning(ItemRequest::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(&self, request_id: i64) -> AppResult<Option<ItemRequest>> {
        use crate::schema::item_requests::dsl::*;
        let mut conn = self.pool.get().await?;

        item_requests
            .filter(id.eq(request_id))
            .select(ItemRequest::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(Into::into)
    }

    /// A user's own requests, newest first.
    pub async fn find_by_requestor(&self, uid: i64) -> AppResult<Vec<ItemRequest>> {
        use crate::schema::item_requests::dsl::*;
        let mut conn = self.pool.get().await?;

        item_requests
            .filter(requestor_id.eq(uid))
            .order(created.desc())
            .select(ItemRequest::as_select())
            .load(&mut conn)
            .await
            .map_err(Into::into)
    }

    /// Requests posted by everyone except the given user, newest first,
    /// with offset pagination.
    pub async fn find_by_other_requestors(
        &self,
        uid: i64,
        offset: i64,
        limit: i64,
    ) -> AppResult<Vec<ItemRequest>> {
        use crate::schema::item_requests::dsl::*;
        let mut conn = self.pool.get().await?;

        item_requests
            .filter(requestor_id.ne(uid))
            .order(created.desc())
            .offset(offset)
            .limit(limit)
            .select(ItemRequest::as_select())
            .load(&mut conn)
            .await
            .map_err(Into::into)
    }
}
