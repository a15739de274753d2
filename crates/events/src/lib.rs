//! Outbound notifications for the maintenance tracker.
//!
//! - [`delivery`]: external delivery channels (SMTP email).
//! - [`reminder`]: the AMC renewal reminder scan run once per day.
//! - [`ReminderScheduler`]: background loop firing the scan at a fixed
//!   wall-clock time.

pub mod delivery;
pub mod reminder;
pub mod scheduler;

pub use delivery::email::{EmailConfig, EmailDelivery};
pub use reminder::{Mailer, PgReminderStore, ReminderScanner, ReminderStore, ScanReport};
pub use scheduler::{ReminderConfig, ReminderScheduler};
