//! User repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{NewUser, UpdateUser, User};

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a new user. The `users_email_key` constraint backstops the
    /// service-level duplicate check.
    pub async fn create(&self, new_user: NewUser) -> AppResult<User> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(users)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(&self, user_id: i64) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(Into::into)
    }

    /// Case-sensitive exact-match lookup used for the email uniqueness check.
    pub async fn find_by_email(&self, user_email: &str) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .filter(email.eq(user_email))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(Into::into)
    }

    /// Updates a user; None fields are left untouched.
    pub async fn update(&self, user_id: i64, update_data: UpdateUser) -> AppResult<User> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(users.filter(id.eq(user_id)))
            .set(&update_data)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(Into::into)
    }

    /// Deletes a user, returning the number of affected rows (0 or 1).
    pub async fn delete(&self, user_id: i64) -> AppResult<usize> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(users.filter(id.eq(user_id)))
            .execute(&mut conn)
            .await
            .map_err(Into::into)
    }
}
