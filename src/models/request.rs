use diesel::prelude::*;
use jiff_diesel::DateTime;

/// ItemRequest model for reading from database
///
/// A user's posted need for an item not currently listed; items created
/// later may reference it via `items.request_id`.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::item_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemRequest {
    pub id: i64,
    pub description: String,
    pub requestor_id: i64,
    pub created: DateTime,
}

/// NewItemRequest model for inserting new records
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::item_requests)]
pub struct NewItemRequest {
    pub description: String,
    pub requestor_id: i64,
    pub created: DateTime,
}
