//! Equipment catalog model and DTOs.

use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use upkeep_core::search::{EquipmentField, Searchable};
use upkeep_core::types::{DbId, Timestamp};
use validator::{Validate, ValidationError};

/// A row from the `equipment` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Equipment {
    pub id: DbId,
    pub name: String,
    pub model_number: String,
    pub buy_price: Decimal,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a catalog entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EquipmentInput {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub model_number: String,
    #[validate(custom(function = "non_negative"))]
    pub buy_price: Decimal,
    pub notes: Option<String>,
}

impl Searchable for Equipment {
    type Field = EquipmentField;

    fn field_value(&self, field: EquipmentField) -> Option<Cow<'_, str>> {
        match field {
            EquipmentField::Name => Some(Cow::Borrowed(self.name.as_str())),
            EquipmentField::ModelNumber => Some(Cow::Borrowed(self.model_number.as_str())),
            EquipmentField::Notes => self.notes.as_deref().map(Cow::Borrowed),
        }
    }
}

/// Reject negative money amounts.
pub(crate) fn non_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("amount must not be negative".into());
        return Err(err);
    }
    Ok(())
}
