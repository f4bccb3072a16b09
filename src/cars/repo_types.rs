use sqlx::FromRow;
use time::OffsetDateTime;

/// Car record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Car {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub year_manufacture: i32,
    pub imported: bool,
    pub plates: String, // normalized, uppercase, 7 chars
    pub selling_date: Option<OffsetDateTime>,
    pub selling_price: Option<f64>,
    pub customer_id: Option<i64>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A validated car, ready to insert or to replace an existing row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    pub brand: String,
    pub model: String,
    pub color: String,
    pub year_manufacture: i32,
    pub imported: bool,
    pub plates: String,
    pub selling_date: Option<OffsetDateTime>,
    pub selling_price: Option<f64>,
    pub customer_id: Option<i64>,
}
