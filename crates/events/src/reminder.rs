//! AMC renewal reminder scan.
//!
//! [`ReminderScanner::scan_once`] looks up every maintenance record whose AMC
//! ends exactly `today + horizon` days from now, for each configured horizon,
//! and mails one reminder per match. Failures are logged and skipped: a
//! failed query moves on to the next horizon, a failed send moves on to the
//! next match, and nothing is retried within a run.
//!
//! There is no record of what was already sent. Running the scan twice on the
//! same day sends the same reminders twice.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use upkeep_core::clock::Clock;
use upkeep_core::notification::{compose_amc_reminder, AmcReminder, ReminderMessage};
use upkeep_core::reminder::{reminder_targets, REMINDER_HORIZONS_DAYS};
use upkeep_core::types::DbId;
use upkeep_db::models::maintenance_record::AmcReminderRow;
use upkeep_db::repositories::MaintenanceRecordRepo;
use upkeep_db::DbPool;

use crate::delivery::email::EmailError;

// ---------------------------------------------------------------------------
// Seams
// ---------------------------------------------------------------------------

/// Read side of the record store used by the scan.
#[async_trait]
pub trait ReminderStore: Send + Sync {
    /// Records whose AMC end date equals `amc_end_date`.
    async fn amc_expiring_on(&self, amc_end_date: NaiveDate)
        -> Result<Vec<AmcReminderRow>, sqlx::Error>;
}

/// Outbound mail channel used by the scan.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &ReminderMessage) -> Result<(), EmailError>;
}

/// [`ReminderStore`] backed by the `maintenance_records` table.
#[derive(Clone)]
pub struct PgReminderStore {
    pool: DbPool,
}

impl PgReminderStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReminderStore for PgReminderStore {
    async fn amc_expiring_on(
        &self,
        amc_end_date: NaiveDate,
    ) -> Result<Vec<AmcReminderRow>, sqlx::Error> {
        MaintenanceRecordRepo::list_amc_expiring_on(&self.pool, amc_end_date).await
    }
}

// ---------------------------------------------------------------------------
// Errors and report
// ---------------------------------------------------------------------------

/// A failure inside one scan run. Logged, never fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum ReminderError {
    #[error("Failed to query AMC contracts ending on {amc_end_date}: {source}")]
    Query {
        amc_end_date: NaiveDate,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to send AMC reminder for record {record_id}: {source}")]
    Dispatch {
        record_id: DbId,
        #[source]
        source: EmailError,
    },
}

/// Outcome of one scan run.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Horizons whose query succeeded.
    pub horizons_scanned: usize,
    /// Records matched across all horizons.
    pub matched: usize,
    /// Reminders handed to the mailer successfully.
    pub sent: usize,
    pub failures: Vec<ReminderError>,
}

impl ScanReport {
    pub fn query_failures(&self) -> usize {
        self.failures
            .iter()
            .filter(|e| matches!(e, ReminderError::Query { .. }))
            .count()
    }

    pub fn dispatch_failures(&self) -> usize {
        self.failures
            .iter()
            .filter(|e| matches!(e, ReminderError::Dispatch { .. }))
            .count()
    }
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Runs the reminder scan against a store and a mailer.
pub struct ReminderScanner<S, M> {
    store: S,
    mailer: M,
    clock: Arc<dyn Clock>,
    horizons: Vec<u32>,
    staff_emails: Vec<String>,
}

impl<S: ReminderStore, M: Mailer> ReminderScanner<S, M> {
    /// Scanner over the standard horizons.
    pub fn new(store: S, mailer: M, clock: Arc<dyn Clock>, staff_emails: Vec<String>) -> Self {
        Self {
            store,
            mailer,
            clock,
            horizons: REMINDER_HORIZONS_DAYS.to_vec(),
            staff_emails,
        }
    }

    /// Replace the horizons (days before AMC end) the scan checks.
    pub fn with_horizons(mut self, horizons: Vec<u32>) -> Self {
        self.horizons = horizons;
        self
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Run one pass over every horizon.
    pub async fn scan_once(&self) -> ScanReport {
        let today = self.clock.today();
        let mut report = ScanReport::default();

        let targets = match reminder_targets(today, &self.horizons) {
            Ok(targets) => targets,
            Err(e) => {
                tracing::error!(%today, error = %e, "AMC reminders: cannot compute target dates");
                return report;
            }
        };

        for target in targets {
            let rows = match self.store.amc_expiring_on(target.amc_end_date).await {
                Ok(rows) => rows,
                Err(source) => {
                    let err = ReminderError::Query {
                        amc_end_date: target.amc_end_date,
                        source,
                    };
                    tracing::error!(
                        days_remaining = target.days_remaining,
                        error = %err,
                        "AMC reminders: query failed, skipping horizon"
                    );
                    report.failures.push(err);
                    continue;
                }
            };

            report.horizons_scanned += 1;
            report.matched += rows.len();
            tracing::debug!(
                days_remaining = target.days_remaining,
                amc_end_date = %target.amc_end_date,
                matches = rows.len(),
                "AMC reminders: horizon scanned"
            );

            for row in rows {
                let record_id = row.record_id;
                let message = compose_amc_reminder(
                    &AmcReminder::from(row),
                    target.days_remaining,
                    &self.staff_emails,
                );

                match self.mailer.send(&message).await {
                    Ok(()) => report.sent += 1,
                    Err(source) => {
                        let err = ReminderError::Dispatch { record_id, source };
                        tracing::error!(record_id, error = %err, "AMC reminders: send failed");
                        report.failures.push(err);
                    }
                }
            }
        }

        report
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
