use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use super::repo_types::Car;

/// Request body for creating or replacing a car.
///
/// Kept loosely typed so coercion and range errors are reported per field
/// instead of failing deserialization as a whole.
#[derive(Debug, Default, Deserialize)]
pub struct CarPayload {
    pub brand: Option<Value>,
    pub model: Option<Value>,
    pub color: Option<Value>,
    pub year_manufacture: Option<Value>,
    pub imported: Option<Value>,
    pub plates: Option<Value>,
    pub selling_date: Option<Value>,
    pub selling_price: Option<Value>,
    pub customer_id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct CarResponse {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub year_manufacture: i32,
    pub imported: bool,
    pub plates: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub selling_date: Option<OffsetDateTime>,
    pub selling_price: Option<f64>,
    pub customer_id: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Car> for CarResponse {
    fn from(c: Car) -> Self {
        Self {
            id: c.id,
            brand: c.brand,
            model: c.model,
            color: c.color,
            year_manufacture: c.year_manufacture,
            imported: c.imported,
            plates: c.plates,
            selling_date: c.selling_date,
            selling_price: c.selling_price,
            customer_id: c.customer_id,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
