//! User service for business logic operations.

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, UpdateUser, User};
use crate::repositories::UserRepository;

/// User service for handling user-related business logic.
///
/// Emails must be unique (case-sensitive exact match); the check runs here
/// before every insert and email-changing update, with the database unique
/// constraint as the backstop against races.
#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Creates a new user; fails with Duplicate if the email is taken.
    pub async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        if self.repo.find_by_email(&new_user.email).await?.is_some() {
            return Err(AppError::Duplicate {
                entity: "users".to_string(),
                field: "email".to_string(),
                value: new_user.email,
            });
        }
        self.repo.create(new_user).await
    }

    /// Gets a user by id, or NotFound.
    pub async fn get_user(&self, id: i64) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("user", id))
    }

    /// Partially updates a user: None fields keep their current value.
    ///
    /// An email change fails with Duplicate when a *different* user already
    /// holds the new address; re-submitting the user's own email is a no-op.
    pub async fn update_user(&self, id: i64, update_data: UpdateUser) -> AppResult<User> {
        let current = self.get_user(id).await?;

        if let Some(new_email) = &update_data.email {
            if let Some(existing) = self.repo.find_by_email(new_email).await? {
                if existing.id != id {
                    return Err(AppError::Duplicate {
                        entity: "users".to_string(),
                        field: "email".to_string(),
                        value: new_email.clone(),
                    });
                }
            }
        }

        if update_data.name.is_none() && update_data.email.is_none() {
            // Nothing to change; an empty changeset is a diesel error.
            return Ok(current);
        }
        self.repo.update(id, update_data).await
    }

    /// Deletes a user, or NotFound if no such user exists.
    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        let affected = self.repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::not_found("user", id));
        }
        Ok(())
    }
}
