//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{NewUser, UpdateUser, User};

/// Request body for creating a new user.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Name must not be blank"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: String,
}

impl CreateUserRequest {
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            name: self.name,
            email: self.email,
        }
    }
}

/// Request body for partially updating a user.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Name must not be blank"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_update_user(self) -> UpdateUser {
        UpdateUser {
            name: self.name,
            email: self.email,
        }
    }
}

/// Response body for user data.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_request_validates_email() {
        let bad = CreateUserRequest {
            name: "Ann".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(bad.validate().is_err());

        let good = CreateUserRequest {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
        };
        assert!(good.validate().is_ok());
    }

    #[test]
    fn test_update_user_request_allows_missing_fields() {
        let partial = UpdateUserRequest {
            name: None,
            email: None,
        };
        assert!(partial.validate().is_ok());
    }
}
