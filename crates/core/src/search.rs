//! Field-scoped substring search over list views.
//!
//! Each searchable entity has its own field enum. Matching is
//! case-insensitive `contains` on the selected field only. An empty query
//! matches everything.

use std::borrow::Cow;

use crate::error::CoreError;

/// A field name a list can be searched by.
pub trait SearchField: Copy + Default + PartialEq + 'static {
    /// Every selectable field.
    const ALL: &'static [Self];

    /// Wire name used in `?field=`.
    fn as_str(&self) -> &'static str;

    /// Look up a field by its wire name.
    fn parse_name(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| CoreError::InvalidInput(format!("Unknown search field: {name}")))
    }
}

/// Implemented by anything a field-scoped search can run over.
pub trait Searchable {
    type Field: SearchField;

    /// Text of `field` for this item, or `None` if the item has no value.
    fn field_value(&self, field: Self::Field) -> Option<Cow<'_, str>>;
}

// ---------------------------------------------------------------------------
// Field sets
// ---------------------------------------------------------------------------

/// Maintenance record list fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordField {
    #[default]
    HospitalName,
    EquipmentName,
    SerialNo,
    ServiceStatus,
    Responsibility,
    /// Matches against the rendered age text, e.g. `"2 years"`.
    EquipmentAge,
}

impl SearchField for RecordField {
    const ALL: &'static [Self] = &[
        Self::HospitalName,
        Self::EquipmentName,
        Self::SerialNo,
        Self::ServiceStatus,
        Self::Responsibility,
        Self::EquipmentAge,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::HospitalName => "hospital_name",
            Self::EquipmentName => "equipment_name",
            Self::SerialNo => "serial_no",
            Self::ServiceStatus => "service_status",
            Self::Responsibility => "responsibility",
            Self::EquipmentAge => "equipment_age",
        }
    }
}

/// Customer list fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CustomerField {
    #[default]
    HospitalName,
    Email,
    ContactInfo,
    HodName,
}

impl SearchField for CustomerField {
    const ALL: &'static [Self] = &[
        Self::HospitalName,
        Self::Email,
        Self::ContactInfo,
        Self::HodName,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::HospitalName => "hospital_name",
            Self::Email => "email",
            Self::ContactInfo => "contact_info",
            Self::HodName => "hod_name",
        }
    }
}

/// Equipment catalog fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EquipmentField {
    #[default]
    Name,
    ModelNumber,
    Notes,
}

impl SearchField for EquipmentField {
    const ALL: &'static [Self] = &[Self::Name, Self::ModelNumber, Self::Notes];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::ModelNumber => "model_number",
            Self::Notes => "notes",
        }
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Case-insensitive substring match. Blank queries match.
pub fn matches_query(value: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || value.to_lowercase().contains(&query.to_lowercase())
}

/// Keep the items whose `field` contains `query`.
pub fn filter_by_field<T: Searchable>(items: Vec<T>, field: T::Field, query: &str) -> Vec<T> {
    if query.trim().is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| {
            item.field_value(field)
                .is_some_and(|value| matches_query(&value, query))
        })
        .collect()
}
