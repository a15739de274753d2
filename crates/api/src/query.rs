//! Shared query parameter types for API handlers.

use serde::Deserialize;
use upkeep_core::error::CoreError;
use upkeep_core::search::SearchField;

/// Field-scoped search parameters (`?field=&q=`).
///
/// A missing `field` selects the list's default field; a missing or blank
/// `q` matches everything.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub field: Option<String>,
    pub q: Option<String>,
}

impl SearchParams {
    /// The selected field of set `F`, rejecting unknown names.
    pub fn field<F: SearchField>(&self) -> Result<F, CoreError> {
        match self.field.as_deref() {
            None | Some("") => Ok(F::default()),
            Some(name) => F::parse_name(name),
        }
    }

    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }
}
