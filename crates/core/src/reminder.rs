//! AMC renewal reminder scheduling rules.
//!
//! The reminder job runs once a day. Each run looks for contracts whose AMC
//! end date is exactly one of [`REMINDER_HORIZONS_DAYS`] days away, so a
//! contract is reminded at most once per horizon over its lifetime (given one
//! run per day).

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::error::CoreError;

/// Days before the AMC end date at which a reminder is sent.
pub const REMINDER_HORIZONS_DAYS: [u32; 3] = [30, 15, 5];

/// Default wall-clock time of the daily run (local midnight).
///
/// Run times are local wall-clock times. A run time that falls in a DST gap
/// does not exist on that day and fires after the naive interval instead.
pub const DEFAULT_RUN_AT: NaiveTime = NaiveTime::MIN;

/// A calendar date the daily scan matches AMC end dates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTarget {
    pub days_remaining: u32,
    pub amc_end_date: NaiveDate,
}

/// `today + horizon` for each horizon, in the order given.
pub fn reminder_targets(
    today: NaiveDate,
    horizons: &[u32],
) -> Result<Vec<ReminderTarget>, CoreError> {
    horizons
        .iter()
        .map(|&days| {
            today
                .checked_add_days(Days::new(u64::from(days)))
                .map(|amc_end_date| ReminderTarget {
                    days_remaining: days,
                    amc_end_date,
                })
                .ok_or_else(|| {
                    CoreError::InvalidInput(format!("{today} plus {days} days is out of range"))
                })
        })
        .collect()
}

/// Parse the daily run time from `HH:MM`.
pub fn parse_run_at(value: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| CoreError::InvalidInput(format!("'{value}' is not a valid HH:MM time: {e}")))
}

/// The first occurrence of `run_at` strictly after `now`.
pub fn next_run_after(now: NaiveDateTime, run_at: NaiveTime) -> NaiveDateTime {
    let today_run = now.date().and_time(run_at);
    if today_run > now {
        today_run
    } else {
        now.date()
            .succ_opt()
            .map(|tomorrow| tomorrow.and_time(run_at))
            .unwrap_or(today_run)
    }
}

/// Real time between two wall-clock readings in `tz`.
///
/// Readings are mapped through `tz` so an offset change between them (a DST
/// transition) is accounted for. Ambiguous readings take the earlier
/// instant. If either reading does not exist in `tz`, the naive difference
/// is used.
pub fn wall_clock_delay<Tz: TimeZone>(
    tz: &Tz,
    now: NaiveDateTime,
    next: NaiveDateTime,
) -> chrono::Duration {
    match (
        tz.from_local_datetime(&now).earliest(),
        tz.from_local_datetime(&next).earliest(),
    ) {
        (Some(now), Some(next)) => next.signed_duration_since(now),
        _ => next - now,
    }
}
