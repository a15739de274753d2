//! Repository for the `maintenance_records` table.
//!
//! Writes take a [`MaintenanceRecordDraft`], so the stored end dates are
//! always the ones derived from the stored inputs.

use chrono::NaiveDate;
use sqlx::PgPool;
use upkeep_core::types::DbId;

use crate::models::maintenance_record::{
    AmcReminderRow, MaintenanceRecord, MaintenanceRecordDetail, MaintenanceRecordDraft,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, customer_id, equipment_id, serial_no, installation_date, \
    warranty_years, warranty_end_date, service_status, amc_start_date, amc_end_date, \
    invoice_amount, responsibility, created_at, updated_at";

/// Joined select used by every detail query.
const DETAIL_SELECT: &str = "SELECT mr.id, mr.customer_id, mr.equipment_id, mr.serial_no, \
    mr.installation_date, mr.warranty_years, mr.warranty_end_date, mr.service_status, \
    mr.amc_start_date, mr.amc_end_date, mr.invoice_amount, mr.responsibility, \
    mr.created_at, mr.updated_at, \
    c.hospital_name, e.name AS equipment_name, e.model_number \
    FROM maintenance_records mr \
    JOIN customers c ON c.id = mr.customer_id \
    JOIN equipment e ON e.id = mr.equipment_id";

/// Provides CRUD operations for maintenance records.
pub struct MaintenanceRecordRepo;

impl MaintenanceRecordRepo {
    /// Insert a new record, returning the created row.
    pub async fn create(
        pool: &PgPool,
        draft: &MaintenanceRecordDraft,
    ) -> Result<MaintenanceRecord, sqlx::Error> {
        let input = draft.input();
        let dates = draft.dates();
        let query = format!(
            "INSERT INTO maintenance_records
                (customer_id, equipment_id, serial_no, installation_date, warranty_years,
                 warranty_end_date, service_status, amc_start_date, amc_end_date,
                 invoice_amount, responsibility)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(input.customer_id)
            .bind(input.equipment_id)
            .bind(&input.serial_no)
            .bind(input.installation_date)
            .bind(input.warranty_years)
            .bind(dates.warranty_end_date())
            .bind(input.service_status.as_str())
            .bind(input.amc_start_date)
            .bind(dates.amc_end_date())
            .bind(input.invoice_amount)
            .bind(&input.responsibility)
            .fetch_one(pool)
            .await
    }

    /// Find a record with its customer and equipment names.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaintenanceRecordDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE mr.id = $1");
        sqlx::query_as::<_, MaintenanceRecordDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all records with customer and equipment names, newest first.
    pub async fn list_detail(pool: &PgPool) -> Result<Vec<MaintenanceRecordDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY mr.created_at DESC, mr.id DESC");
        sqlx::query_as::<_, MaintenanceRecordDetail>(&query)
            .fetch_all(pool)
            .await
    }

    /// Replace a record's inputs and derived dates. Returns `None` if no row
    /// matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        draft: &MaintenanceRecordDraft,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let input = draft.input();
        let dates = draft.dates();
        let query = format!(
            "UPDATE maintenance_records SET
                customer_id = $2,
                equipment_id = $3,
                serial_no = $4,
                installation_date = $5,
                warranty_years = $6,
                warranty_end_date = $7,
                service_status = $8,
                amc_start_date = $9,
                amc_end_date = $10,
                invoice_amount = $11,
                responsibility = $12,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(id)
            .bind(input.customer_id)
            .bind(input.equipment_id)
            .bind(&input.serial_no)
            .bind(input.installation_date)
            .bind(input.warranty_years)
            .bind(dates.warranty_end_date())
            .bind(input.service_status.as_str())
            .bind(input.amc_start_date)
            .bind(dates.amc_end_date())
            .bind(input.invoice_amount)
            .bind(&input.responsibility)
            .fetch_optional(pool)
            .await
    }

    /// Delete a record and its service visits. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM maintenance_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Records whose AMC ends exactly on `amc_end_date`, with the customer
    /// contact and equipment name needed to compose a reminder.
    pub async fn list_amc_expiring_on(
        pool: &PgPool,
        amc_end_date: NaiveDate,
    ) -> Result<Vec<AmcReminderRow>, sqlx::Error> {
        sqlx::query_as::<_, AmcReminderRow>(
            "SELECT mr.id AS record_id, c.email AS customer_email, c.hospital_name, \
                    e.name AS equipment_name, mr.amc_end_date \
             FROM maintenance_records mr \
             JOIN customers c ON c.id = mr.customer_id \
             JOIN equipment e ON e.id = mr.equipment_id \
             WHERE mr.amc_end_date = $1 \
             ORDER BY mr.id",
        )
        .bind(amc_end_date)
        .fetch_all(pool)
        .await
    }
}
