//! Calendar event model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use upkeep_core::types::{DbId, Timestamp};
use validator::{Validate, ValidationError};

/// A row from the `calendar_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CalendarEvent {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_range"))]
pub struct CalendarEventInput {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

fn validate_range(input: &CalendarEventInput) -> Result<(), ValidationError> {
    if input.end_date < input.start_date {
        let mut err = ValidationError::new("range");
        err.message = Some("end_date must not precede start_date".into());
        return Err(err);
    }
    Ok(())
}
