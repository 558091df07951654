use diesel::prelude::*;

/// Item model for reading from database
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

/// NewItem model for inserting new records
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::items)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

/// UpdateItem model for partial updates by the item's owner
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::items)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}
