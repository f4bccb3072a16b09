use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{Car, NewCar};
use crate::db::StoreError;

#[async_trait]
pub trait CarStore: Send + Sync {
    async fn create(&self, car: NewCar) -> Result<Car, StoreError>;
    async fn list(&self) -> Result<Vec<Car>, StoreError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, StoreError>;
    /// Replaces every field; `false` when no row has `id`.
    async fn update(&self, id: i64, car: NewCar) -> Result<bool, StoreError>;
    /// Returns `false` when no row has `id`.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct PgCarStore {
    db: PgPool,
}

impl PgCarStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CarStore for PgCarStore {
    async fn create(&self, car: NewCar) -> Result<Car, StoreError> {
        let row = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (brand, model, color, year_manufacture, imported, plates,
                              selling_date, selling_price, customer_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, brand, model, color, year_manufacture, imported, plates,
                      selling_date, selling_price, customer_id, created_at, updated_at
            "#,
        )
        .bind(&car.brand)
        .bind(&car.model)
        .bind(&car.color)
        .bind(car.year_manufacture)
        .bind(car.imported)
        .bind(&car.plates)
        .bind(car.selling_date)
        .bind(car.selling_price)
        .bind(car.customer_id)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Car>, StoreError> {
        let rows = sqlx::query_as::<_, Car>(
            r#"
            SELECT id, brand, model, color, year_manufacture, imported, plates,
                   selling_date, selling_price, customer_id, created_at, updated_at
            FROM cars
            ORDER BY brand, model, id
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, StoreError> {
        let row = sqlx::query_as::<_, Car>(
            r#"
            SELECT id, brand, model, color, year_manufacture, imported, plates,
                   selling_date, selling_price, customer_id, created_at, updated_at
            FROM cars
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, car: NewCar) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE cars
               SET brand = $2, model = $3, color = $4, year_manufacture = $5,
                   imported = $6, plates = $7, selling_date = $8, selling_price = $9,
                   customer_id = $10, updated_at = now()
             WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&car.brand)
        .bind(&car.model)
        .bind(&car.color)
        .bind(car.year_manufacture)
        .bind(car.imported)
        .bind(&car.plates)
        .bind(car.selling_date)
        .bind(car.selling_price)
        .bind(car.customer_id)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
