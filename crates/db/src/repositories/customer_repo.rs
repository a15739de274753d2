//! Repository for the `customers` table.

use sqlx::PgPool;
use upkeep_core::types::DbId;

use crate::models::customer::{Customer, CustomerInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, hospital_name, email, contact_info, hod_name, created_at, updated_at";

/// Provides CRUD operations for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a new customer, returning the created row.
    pub async fn create(pool: &PgPool, input: &CustomerInput) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (hospital_name, email, contact_info, hod_name)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&input.hospital_name)
            .bind(&input.email)
            .bind(&input.contact_info)
            .bind(&input.hod_name)
            .fetch_one(pool)
            .await
    }

    /// Find a customer by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all customers alphabetically by hospital name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers ORDER BY hospital_name");
        sqlx::query_as::<_, Customer>(&query).fetch_all(pool).await
    }

    /// Replace a customer's fields. Returns `None` if no row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CustomerInput,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET
                hospital_name = $2,
                email = $3,
                contact_info = $4,
                hod_name = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(&input.hospital_name)
            .bind(&input.email)
            .bind(&input.contact_info)
            .bind(&input.hod_name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a customer and, by cascade, its maintenance records.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
