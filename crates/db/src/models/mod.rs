//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` input DTO used for both inserts and full updates

pub mod calendar_event;
pub mod customer;
pub mod equipment;
pub mod maintenance_record;
pub mod service_visit;

/// Map `validator` failures onto the domain's invalid-input error.
pub fn validation_error(errors: validator::ValidationErrors) -> upkeep_core::error::CoreError {
    upkeep_core::error::CoreError::InvalidInput(errors.to_string())
}
