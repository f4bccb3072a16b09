use sqlx::FromRow;
use time::{Date, OffsetDateTime};

/// Customer record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub ident_document: String,
    pub birth_date: Option<Date>,
    pub street_name: String,
    pub house_number: String,
    pub complements: Option<String>,
    pub district: String,
    pub municipality: String,
    pub state: String,
    pub phone: String,
    pub email: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A validated customer, ready to insert or to replace an existing row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub ident_document: String,
    pub birth_date: Option<Date>,
    pub street_name: String,
    pub house_number: String,
    pub complements: Option<String>,
    pub district: String,
    pub municipality: String,
    pub state: String,
    pub phone: String,
    pub email: String,
}
