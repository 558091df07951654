use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::error::{AppError, ConstraintParser};

/// Converts Diesel database errors to structured AppError variants.
///
/// Unique violations become Duplicate errors (the email constraint is the
/// backstop for the service-level duplicate check); not-null and foreign key
/// violations become Validation errors; everything else surfaces as a
/// Database error with the failed operation attached.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info, operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync>,
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint_name = info.constraint_name();

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                if let Some((entity, field, value)) =
                    ConstraintParser::parse_unique_violation(message, constraint_name)
                {
                    AppError::Duplicate {
                        entity,
                        field,
                        value,
                    }
                } else {
                    AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Unique constraint violation: {}",
                            message
                        )),
                    }
                }
            }
            DatabaseErrorKind::NotNullViolation => {
                if let Some(field) = ConstraintParser::parse_not_null_violation(message) {
                    AppError::Validation {
                        field,
                        reason: "Field is required".to_string(),
                    }
                } else {
                    AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Not null constraint violation: {}",
                            message
                        )),
                    }
                }
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                if let Some((field, referenced_value)) =
                    ConstraintParser::parse_foreign_key_violation(message)
                {
                    AppError::Validation {
                        field,
                        reason: format!("Invalid reference '{}'", referenced_value),
                    }
                } else {
                    AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "Foreign key constraint violation: {}",
                            message
                        )),
                    }
                }
            }
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("Database error: {}", message)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
        constraint_name: Option<String>,
    }

    impl diesel::result::DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn test_convert_not_found_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find user");
        assert!(matches!(result, AppError::NotFound { .. }));
    }

    #[test]
    fn test_convert_duplicate_email() {
        let info = MockDatabaseErrorInfo {
            message: "duplicate key value violates unique constraint \"users_email_key\"\nDETAIL: Key (email)=(owner@example.com) already exists.".to_string(),
            constraint_name: Some("users_email_key".to_string()),
        };
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(info));

        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert user");

        match result {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "users");
                assert_eq!(field, "email");
                assert_eq!(value, "owner@example.com");
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_foreign_key_violation() {
        let info = MockDatabaseErrorInfo {
            message: "insert or update on table \"bookings\" violates foreign key constraint \"bookings_booker_id_fkey\"\nDETAIL: Key (booker_id)=(404) is not present in table \"users\".".to_string(),
            constraint_name: Some("bookings_booker_id_fkey".to_string()),
        };
        let error =
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, Box::new(info));

        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert booking");

        match result {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "booker_id");
                assert!(reason.contains("404"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_not_null_violation() {
        let info = MockDatabaseErrorInfo {
            message: "null value in column \"name\" violates not-null constraint".to_string(),
            constraint_name: None,
        };
        let error = DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, Box::new(info));

        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert item");

        match result {
            AppError::Validation { field, .. } => assert_eq!(field, "name"),
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }
}
