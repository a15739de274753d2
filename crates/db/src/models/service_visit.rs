//! Service visit log entries attached to a maintenance record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use upkeep_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `service_visits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceVisit {
    pub id: DbId,
    pub maintenance_record_id: DbId,
    pub visit_date: NaiveDate,
    pub technician_name: String,
    pub description: String,
    pub created_at: Timestamp,
}

/// DTO for logging a visit. The parent record comes from the URL.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateServiceVisit {
    pub visit_date: NaiveDate,
    #[validate(length(min = 1, message = "technician_name must not be empty"))]
    pub technician_name: String,
    #[serde(default)]
    pub description: String,
}
