//! Domain rules for equipment maintenance tracking.
//!
//! This crate has no I/O: contract date derivation, equipment age, reminder
//! scheduling and message composition, and record search. Persistence lives
//! in `upkeep-db`, mail delivery and the reminder scan in `upkeep-events`.

pub mod clock;
pub mod contract;
pub mod dates;
pub mod error;
pub mod notification;
pub mod reminder;
pub mod search;
pub mod types;
