//! Date derivation for maintenance contracts: warranty end date, AMC end
//! date, and the elapsed equipment age shown next to each record.
//!
//! Year addition is month addition via [`NaiveDate::checked_add_months`],
//! which clamps to the last day of the target month. A Feb 29 start
//! therefore lands on Feb 28 when the target year is not a leap year.
//!
//! Dates cross the store boundary as ISO-8601 `yyyy-MM-dd` strings.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::error::CoreError;

/// `chrono` format string for `yyyy-MM-dd`.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Warranty durations offered on the maintenance form, in whole years.
pub const WARRANTY_YEARS_OPTIONS: [i32; 6] = [1, 2, 3, 4, 5, 6];

/// Length of one AMC term, in years.
pub const AMC_TERM_YEARS: u32 = 1;

/// The day component of an age is the day difference reduced modulo this.
const DAY_RESIDUE_MODULUS: i64 = 30;

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a `yyyy-MM-dd` date.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).map_err(|e| {
        CoreError::InvalidInput(format!("'{value}' is not a valid yyyy-MM-dd date: {e}"))
    })
}

/// Parse an optional form date. Blank input is treated as absent.
pub fn parse_optional_iso_date(value: &str) -> Result<Option<NaiveDate>, CoreError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_iso_date(value).map(Some)
    }
}

// ---------------------------------------------------------------------------
// End dates
// ---------------------------------------------------------------------------

/// Add whole calendar years to `date`.
pub fn add_years(date: NaiveDate, years: u32) -> Result<NaiveDate, CoreError> {
    date.checked_add_months(Months::new(years * 12))
        .ok_or_else(|| CoreError::InvalidInput(format!("{date} plus {years} years is out of range")))
}

/// Check that `years` is one of [`WARRANTY_YEARS_OPTIONS`].
pub fn validate_warranty_years(years: i32) -> Result<u32, CoreError> {
    if WARRANTY_YEARS_OPTIONS.contains(&years) {
        Ok(years.unsigned_abs())
    } else {
        Err(CoreError::InvalidInput(format!(
            "warranty_years must be one of {WARRANTY_YEARS_OPTIONS:?}, got {years}"
        )))
    }
}

/// Installation date plus the warranty duration in whole years.
pub fn warranty_end_date(
    installation_date: NaiveDate,
    warranty_years: i32,
) -> Result<NaiveDate, CoreError> {
    let years = validate_warranty_years(warranty_years)?;
    add_years(installation_date, years)
}

/// AMC start date plus one year, or `None` when there is no AMC.
pub fn amc_end_date(amc_start_date: Option<NaiveDate>) -> Result<Option<NaiveDate>, CoreError> {
    amc_start_date
        .map(|start| add_years(start, AMC_TERM_YEARS))
        .transpose()
}

// ---------------------------------------------------------------------------
// Equipment age
// ---------------------------------------------------------------------------

/// Elapsed time since installation.
///
/// `days` is the day difference between `as_of` and the last installation
/// anniversary, reduced modulo 30. It is an approximation and is not the
/// true calendar-day remainder after `months`; do not do arithmetic on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EquipmentAge {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl EquipmentAge {
    pub const ZERO: EquipmentAge = EquipmentAge {
        years: 0,
        months: 0,
        days: 0,
    };
}

impl fmt::Display for EquipmentAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            quantity(self.years, "year"),
            quantity(self.months, "month"),
            quantity(self.days, "day")
        )
    }
}

fn quantity(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Number of complete months from `start` to `end`. Requires `start <= end`.
///
/// A month is complete once `start + n months`, clamped to the end of the
/// month, is on or before `end`. Jan 31 to Feb 28 is one month and Jan 31 to
/// Apr 30 is three.
fn whole_months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let span = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let months = span.max(0).unsigned_abs();
    match start.checked_add_months(Months::new(months)) {
        Some(anchor) if anchor <= end => months,
        _ => months.saturating_sub(1),
    }
}

/// Age of equipment installed on `installation_date`, measured at `as_of`.
///
/// Fails with [`CoreError::InvalidInput`] when `as_of` precedes the
/// installation date.
pub fn equipment_age(
    installation_date: NaiveDate,
    as_of: NaiveDate,
) -> Result<EquipmentAge, CoreError> {
    if as_of < installation_date {
        return Err(CoreError::InvalidInput(format!(
            "installation date {installation_date} is after {as_of}"
        )));
    }

    let total_months = whole_months_between(installation_date, as_of);
    let years = total_months / 12;
    let months = total_months % 12;

    let anniversary = add_years(installation_date, years)?;
    let days = (as_of - anniversary).num_days() % DAY_RESIDUE_MODULUS;

    Ok(EquipmentAge {
        years,
        months,
        days: days.unsigned_abs() as u32,
    })
}

/// Age column text for a record. A missing installation date renders as an
/// empty string; a future one is still an error.
pub fn equipment_age_display(
    installation_date: Option<NaiveDate>,
    as_of: NaiveDate,
) -> Result<String, CoreError> {
    match installation_date {
        None => Ok(String::new()),
        Some(date) => equipment_age(date, as_of).map(|age| age.to_string()),
    }
}
