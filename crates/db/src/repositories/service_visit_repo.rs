//! Repository for the `service_visits` table.

use sqlx::PgPool;
use upkeep_core::types::DbId;

use crate::models::service_visit::{CreateServiceVisit, ServiceVisit};

const COLUMNS: &str =
    "id, maintenance_record_id, visit_date, technician_name, description, created_at";

/// Provides create/list/delete for the visit log of a maintenance record.
pub struct ServiceVisitRepo;

impl ServiceVisitRepo {
    /// Log a visit against `maintenance_record_id`.
    pub async fn create(
        pool: &PgPool,
        maintenance_record_id: DbId,
        input: &CreateServiceVisit,
    ) -> Result<ServiceVisit, sqlx::Error> {
        let query = format!(
            "INSERT INTO service_visits (maintenance_record_id, visit_date, technician_name, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceVisit>(&query)
            .bind(maintenance_record_id)
            .bind(input.visit_date)
            .bind(&input.technician_name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Visits for a record, most recent visit first.
    pub async fn list_by_record(
        pool: &PgPool,
        maintenance_record_id: DbId,
    ) -> Result<Vec<ServiceVisit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM service_visits
             WHERE maintenance_record_id = $1
             ORDER BY visit_date DESC, id DESC"
        );
        sqlx::query_as::<_, ServiceVisit>(&query)
            .bind(maintenance_record_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a visit, scoped to its parent record. Returns `true` if a row
    /// was removed.
    pub async fn delete(
        pool: &PgPool,
        maintenance_record_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM service_visits WHERE id = $1 AND maintenance_record_id = $2",
        )
        .bind(id)
        .bind(maintenance_record_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
