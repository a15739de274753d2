//! Maintenance contract vocabulary (service status) and the derived date
//! pair stored alongside every maintenance record.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Service status
// ---------------------------------------------------------------------------

/// Coverage a piece of equipment is currently serviced under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceStatus {
    #[serde(rename = "warranty")]
    Warranty,
    #[serde(rename = "AMC")]
    Amc,
    #[serde(rename = "CAMC")]
    Camc,
    #[serde(rename = "calibration")]
    Calibration,
    #[serde(rename = "On call service")]
    OnCallService,
}

impl ServiceStatus {
    pub const ALL: [ServiceStatus; 5] = [
        ServiceStatus::Warranty,
        ServiceStatus::Amc,
        ServiceStatus::Camc,
        ServiceStatus::Calibration,
        ServiceStatus::OnCallService,
    ];

    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warranty => "warranty",
            Self::Amc => "AMC",
            Self::Camc => "CAMC",
            Self::Calibration => "calibration",
            Self::OnCallService => "On call service",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::InvalidInput(format!("Unknown service status: {s}")))
    }
}

// ---------------------------------------------------------------------------
// Derived dates
// ---------------------------------------------------------------------------

/// End dates derived from a record's installation, warranty and AMC inputs.
///
/// Only constructible through [`ContractDates::derive`], so a value of this
/// type always satisfies the end-date invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContractDates {
    warranty_end_date: NaiveDate,
    amc_end_date: Option<NaiveDate>,
}

impl ContractDates {
    pub fn derive(
        installation_date: NaiveDate,
        warranty_years: i32,
        amc_start_date: Option<NaiveDate>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            warranty_end_date: dates::warranty_end_date(installation_date, warranty_years)?,
            amc_end_date: dates::amc_end_date(amc_start_date)?,
        })
    }

    pub fn warranty_end_date(&self) -> NaiveDate {
        self.warranty_end_date
    }

    pub fn amc_end_date(&self) -> Option<NaiveDate> {
        self.amc_end_date
    }
}
