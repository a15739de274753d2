//! Repository for the `equipment` table.

use sqlx::PgPool;
use upkeep_core::types::DbId;

use crate::models::equipment::{Equipment, EquipmentInput};

const COLUMNS: &str = "id, name, model_number, buy_price, notes, created_at, updated_at";

/// Provides CRUD operations for the equipment catalog.
pub struct EquipmentRepo;

impl EquipmentRepo {
    pub async fn create(pool: &PgPool, input: &EquipmentInput) -> Result<Equipment, sqlx::Error> {
        let query = format!(
            "INSERT INTO equipment (name, model_number, buy_price, notes)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(&input.name)
            .bind(&input.model_number)
            .bind(input.buy_price)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment WHERE id = $1");
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the catalog ordered by name, then model number.
    pub async fn list(pool: &PgPool) -> Result<Vec<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment ORDER BY name, model_number");
        sqlx::query_as::<_, Equipment>(&query).fetch_all(pool).await
    }

    /// Replace a catalog entry. Returns `None` if no row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &EquipmentInput,
    ) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!(
            "UPDATE equipment SET
                name = $2,
                model_number = $3,
                buy_price = $4,
                notes = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.model_number)
            .bind(input.buy_price)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
