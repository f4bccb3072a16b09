use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{Customer, NewCustomer};
use crate::db::StoreError;

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn create(&self, customer: NewCustomer) -> Result<Customer, StoreError>;
    async fn list(&self) -> Result<Vec<Customer>, StoreError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, StoreError>;
    /// Replaces every field; `false` when no row has `id`.
    async fn update(&self, id: i64, customer: NewCustomer) -> Result<bool, StoreError>;
    /// `false` when no row has `id`; `Conflict` while cars still reference it.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct PgCustomerStore {
    db: PgPool,
}

impl PgCustomerStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn create(&self, c: NewCustomer) -> Result<Customer, StoreError> {
        let row = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, ident_document, birth_date, street_name, house_number,
                                   complements, district, municipality, state, phone, email)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, name, ident_document, birth_date, street_name, house_number,
                      complements, district, municipality, state, phone, email,
                      created_at, updated_at
            "#,
        )
        .bind(&c.name)
        .bind(&c.ident_document)
        .bind(c.birth_date)
        .bind(&c.street_name)
        .bind(&c.house_number)
        .bind(&c.complements)
        .bind(&c.district)
        .bind(&c.municipality)
        .bind(&c.state)
        .bind(&c.phone)
        .bind(&c.email)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Customer>, StoreError> {
        let rows = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, ident_document, birth_date, street_name, house_number,
                   complements, district, municipality, state, phone, email,
                   created_at, updated_at
            FROM customers
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, StoreError> {
        let row = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, ident_document, birth_date, street_name, house_number,
                   complements, district, municipality, state, phone, email,
                   created_at, updated_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, c: NewCustomer) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE customers
               SET name = $2, ident_document = $3, birth_date = $4, street_name = $5,
                   house_number = $6, complements = $7, district = $8, municipality = $9,
                   state = $10, phone = $11, email = $12, updated_at = now()
             WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&c.name)
        .bind(&c.ident_document)
        .bind(c.birth_date)
        .bind(&c.street_name)
        .bind(&c.house_number)
        .bind(&c.complements)
        .bind(&c.district)
        .bind(&c.municipality)
        .bind(&c.state)
        .bind(&c.phone)
        .bind(&c.email)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
