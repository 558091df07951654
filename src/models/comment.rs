use diesel::prelude::*;
use jiff_diesel::DateTime;

/// Comment model for reading from database
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: DateTime,
}

/// NewComment model for inserting new records
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment {
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: DateTime,
}
