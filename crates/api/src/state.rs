use std::sync::Arc;

use upkeep_core::clock::Clock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: upkeep_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Source of "today" for equipment age.
    pub clock: Arc<dyn Clock>,
    /// Whether the daily AMC reminder scheduler was started.
    pub reminders_enabled: bool,
}
