//! Comment repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{Comment, NewComment};
use crate::schema::{comments, users};

#[derive(Clone)]
pub struct CommentRepository {
    pool: AsyncDbPool,
}

impl CommentRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_comment: NewComment) -> AppResult<Comment> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(comments::table)
            .values(&new_comment)
            .returning(Comment::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(Into::into)
    }

    /// All comments on an item with their author names, oldest first.
    pub async fn find_by_item_id(&self, iid: i64) -> AppResult<Vec<(Comment, String)>> {
        let mut conn = self.pool.get().await?;

        comments::table
            .inner_join(users::table)
            .filter(comments::item_id.eq(iid))
            .order(comments::created.asc())
            .select((Comment::as_select(), users::name))
            .load(&mut conn)
            .await
            .map_err(Into::into)
    }
}
