//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod calendar_event_repo;
pub mod customer_repo;
pub mod equipment_repo;
pub mod maintenance_record_repo;
pub mod service_visit_repo;

pub use calendar_event_repo::CalendarEventRepo;
pub use customer_repo::CustomerRepo;
pub use equipment_repo::EquipmentRepo;
pub use maintenance_record_repo::MaintenanceRecordRepo;
pub use service_visit_repo::ServiceVisitRepo;
