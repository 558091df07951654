use diesel::prelude::*;
use serde::Deserialize;

/// User model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// NewUser model for inserting new records
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// UpdateUser model for partial updates
/// Derives AsChangeset for UPDATE operations with optional fields
#[derive(Debug, AsChangeset, Deserialize, Clone, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}
