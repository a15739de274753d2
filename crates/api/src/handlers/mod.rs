pub mod calendar_event;
pub mod customer;
pub mod equipment;
pub mod maintenance_record;
pub mod service_visit;
