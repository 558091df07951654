//! Item repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{Item, NewItem, UpdateItem};

#[derive(Clone)]
pub struct ItemRepository {
    pool: AsyncDbPool,
}

impl ItemRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_item: NewItem) -> AppResult<Item> {
        use crate::schema::items::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(items)
            .values(&new_item)
            .returning(Item::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(&self, item_id: i64) -> AppResult<Option<Item>> {
        use crate::schema::items::dsl::*;
        let mut conn = self.pool.get().await?;

        items
            .filter(id.eq(item_id))
            .select(Item::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(Into::into)
    }

    /// All items listed by the given owner.
    pub async fn find_by_owner(&self, uid: i64) -> AppResult<Vec<Item>> {
        use crate::schema::items::dsl::*;
        let mut conn = self.pool.get().await?;

        items
            .filter(owner_id.eq(uid))
            .order(id.asc())
            .select(Item::as_select())
            .load(&mut conn)
            .await
            .map_err(Into::into)
    }

    /// Whether the given user has listed at least one item.
    pub async fn owner_has_items(&self, uid: i64) -> AppResult<bool> {
        use crate::schema::items::dsl::*;
        let mut conn = self.pool.get().await?;

        let found: Option<i64> = items
            .filter(owner_id.eq(uid))
            .select(id)
            .first(&mut conn)
            .await
            .optional()?;
        Ok(found.is_some())
    }

    /// Case-insensitive substring search over name and description,
    /// restricted to available items.
    pub async fn search(&self, text: &str) -> AppResult<Vec<Item>> {
        use crate::schema::items::dsl::*;
        let mut conn = self.pool.get().await?;

        let pattern = format!("%{}%", text);
        items
            .filter(available.eq(true))
            .filter(
                name.ilike(pattern.clone())
                    .or(description.ilike(pattern)),
            )
            .order(id.asc())
            .select(Item::as_select())
            .load(&mut conn)
            .await
            .map_err(Into::into)
    }

    /// Batch lookup of all items answering any of the given item requests.
    pub async fn find_by_request_ids(&self, ids: &[i64]) -> AppResult<Vec<Item>> {
        use crate::schema::items::dsl::*;
        let mut conn = self.pool.get().await?;

        items
            .filter(request_id.eq_any(ids.iter().copied().map(Some)))
            .select(Item::as_select())
            .load(&mut conn)
            .await
            .map_err(Into::into)
    }

    /// Updates an item; None fields are left untouched.
    pub async fn update(&self, item_id: i64, update_data: UpdateItem) -> AppResult<Item> {
        use crate::schema::items::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(items.filter(id.eq(item_id)))
            .set(&update_data)
            .returning(Item::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(Into::into)
    }
}
