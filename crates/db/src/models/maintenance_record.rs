//! Maintenance record entity model and DTOs.
//!
//! `warranty_end_date` and `amc_end_date` are outputs, never inputs: the
//! repository only accepts a [`MaintenanceRecordDraft`], which can only be
//! built by deriving both dates from the caller's [`MaintenanceRecordInput`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use upkeep_core::contract::{ContractDates, ServiceStatus};
use upkeep_core::error::CoreError;
use upkeep_core::notification::AmcReminder;
use upkeep_core::types::{DbId, Timestamp};
use validator::Validate;

use crate::models::equipment::non_negative;
use crate::models::validation_error;

/// A row from the `maintenance_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaintenanceRecord {
    pub id: DbId,
    pub customer_id: DbId,
    pub equipment_id: DbId,
    pub serial_no: String,
    pub installation_date: NaiveDate,
    pub warranty_years: i32,
    pub warranty_end_date: NaiveDate,
    pub service_status: String,
    pub amc_start_date: Option<NaiveDate>,
    pub amc_end_date: Option<NaiveDate>,
    pub invoice_amount: Decimal,
    pub responsibility: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A maintenance record joined with its customer and equipment names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaintenanceRecordDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub record: MaintenanceRecord,
    pub hospital_name: String,
    pub equipment_name: String,
    pub model_number: String,
}

/// DTO for creating or replacing a maintenance record.
///
/// Deliberately has no end-date fields; they are always derived.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MaintenanceRecordInput {
    pub customer_id: DbId,
    pub equipment_id: DbId,
    #[serde(default)]
    pub serial_no: String,
    pub installation_date: NaiveDate,
    pub warranty_years: i32,
    pub service_status: ServiceStatus,
    pub amc_start_date: Option<NaiveDate>,
    #[validate(custom(function = "non_negative"))]
    pub invoice_amount: Decimal,
    #[serde(default)]
    pub responsibility: String,
}

impl MaintenanceRecordInput {
    /// Validate the input and derive its end dates.
    pub fn into_draft(self) -> Result<MaintenanceRecordDraft, CoreError> {
        self.validate().map_err(validation_error)?;
        let dates =
            ContractDates::derive(self.installation_date, self.warranty_years, self.amc_start_date)?;
        Ok(MaintenanceRecordDraft { input: self, dates })
    }
}

/// A validated input together with its derived end dates.
#[derive(Debug, Clone)]
pub struct MaintenanceRecordDraft {
    input: MaintenanceRecordInput,
    dates: ContractDates,
}

impl MaintenanceRecordDraft {
    pub fn input(&self) -> &MaintenanceRecordInput {
        &self.input
    }

    pub fn dates(&self) -> &ContractDates {
        &self.dates
    }
}

/// Row shape returned by the reminder scan query.
#[derive(Debug, Clone, FromRow)]
pub struct AmcReminderRow {
    pub record_id: DbId,
    pub customer_email: String,
    pub hospital_name: String,
    pub equipment_name: String,
    pub amc_end_date: NaiveDate,
}

impl From<AmcReminderRow> for AmcReminder {
    fn from(row: AmcReminderRow) -> Self {
        AmcReminder {
            customer_email: row.customer_email,
            customer_name: row.hospital_name,
            equipment_name: row.equipment_name,
            amc_end_date: row.amc_end_date,
        }
    }
}
