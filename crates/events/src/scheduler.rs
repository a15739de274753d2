//! Daily AMC reminder scheduler.
//!
//! [`ReminderScheduler`] runs as a background task and fires
//! [`ReminderScanner::scan_once`] once a day at the configured local time.

use std::time::Duration;

use chrono::{Local, NaiveTime};
use tokio_util::sync::CancellationToken;
use upkeep_core::reminder::{next_run_after, parse_run_at, wall_clock_delay, DEFAULT_RUN_AT};

use crate::reminder::{Mailer, ReminderScanner, ReminderStore};

// ---------------------------------------------------------------------------
// ReminderConfig
// ---------------------------------------------------------------------------

/// Settings for the daily reminder run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderConfig {
    /// Local wall-clock time of the daily run.
    pub run_at: NaiveTime,
    /// Staff addresses copied on every reminder.
    pub staff_emails: Vec<String>,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            run_at: DEFAULT_RUN_AT,
            staff_emails: Vec::new(),
        }
    }
}

impl ReminderConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable                | Default | Format            |
    /// |-------------------------|---------|-------------------|
    /// | `REMINDER_RUN_AT`       | `00:00` | `HH:MM`, local    |
    /// | `REMINDER_STAFF_EMAILS` | empty   | comma-separated   |
    pub fn from_env() -> Self {
        let run_at = match std::env::var("REMINDER_RUN_AT") {
            Ok(value) => parse_run_at(&value).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Invalid REMINDER_RUN_AT, using midnight");
                DEFAULT_RUN_AT
            }),
            Err(_) => DEFAULT_RUN_AT,
        };

        let staff_emails = std::env::var("REMINDER_STAFF_EMAILS")
            .map(|v| parse_email_list(&v))
            .unwrap_or_default();

        Self {
            run_at,
            staff_emails,
        }
    }
}

fn parse_email_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// ReminderScheduler
// ---------------------------------------------------------------------------

/// Background service that runs the reminder scan once per day.
pub struct ReminderScheduler<S, M> {
    scanner: ReminderScanner<S, M>,
    run_at: NaiveTime,
}

impl<S: ReminderStore, M: Mailer> ReminderScheduler<S, M> {
    pub fn new(scanner: ReminderScanner<S, M>, run_at: NaiveTime) -> Self {
        Self { scanner, run_at }
    }

    /// Time to wait from the scanner clock's "now" until the next run.
    ///
    /// Measured in the host's local zone, so a DST change before the run
    /// still fires at the configured wall-clock time.
    fn delay_until_next_run(&self) -> Duration {
        let now = self.scanner.clock().now();
        let next = next_run_after(now, self.run_at);
        wall_clock_delay(&Local, now, next)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Run the scheduler loop until `cancel` is triggered.
    pub async fn run(&self, cancel: CancellationToken) {
        tracing::info!(run_at = %self.run_at, "AMC reminder scheduler started");
        tracing::warn!(
            "AMC reminders are not de-duplicated; a restart that runs the scan twice \
             on one day sends duplicate reminders"
        );

        loop {
            let delay = self.delay_until_next_run();
            tracing::debug!(delay_secs = delay.as_secs(), "AMC reminder scheduler sleeping");

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("AMC reminder scheduler cancelled");
                    break;
                }
                _ = tokio::time::sleep(delay) => {
                    let report = self.scanner.scan_once().await;
                    if report.failures.is_empty() {
                        tracing::info!(
                            horizons = report.horizons_scanned,
                            matched = report.matched,
                            sent = report.sent,
                            "AMC reminder scan complete"
                        );
                    } else {
                        tracing::warn!(
                            horizons = report.horizons_scanned,
                            matched = report.matched,
                            sent = report.sent,
                            query_failures = report.query_failures(),
                            dispatch_failures = report.dispatch_failures(),
                            "AMC reminder scan completed with failures"
                        );
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
