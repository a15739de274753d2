//! Customer (hospital) entity model and DTOs.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use upkeep_core::search::{CustomerField, Searchable};
use upkeep_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `customers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub hospital_name: String,
    pub email: String,
    pub contact_info: String,
    pub hod_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a customer.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CustomerInput {
    #[validate(length(min = 1, message = "hospital_name must not be empty"))]
    pub hospital_name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[serde(default)]
    pub contact_info: String,
    /// Head of department, the customer's point of contact.
    #[serde(default)]
    pub hod_name: String,
}

impl Searchable for Customer {
    type Field = CustomerField;

    fn field_value(&self, field: CustomerField) -> Option<Cow<'_, str>> {
        let value = match field {
            CustomerField::HospitalName => &self.hospital_name,
            CustomerField::Email => &self.email,
            CustomerField::ContactInfo => &self.contact_info,
            CustomerField::HodName => &self.hod_name,
        };
        Some(Cow::Borrowed(value.as_str()))
    }
}
