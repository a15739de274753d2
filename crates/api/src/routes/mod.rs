pub mod calendar_event;
pub mod customer;
pub mod equipment;
pub mod health;
pub mod maintenance_record;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /customers                                        list, create
/// /customers/{id}                                   get, update, delete
///
/// /equipment                                        list, create
/// /equipment/{id}                                   get, update, delete
///
/// /maintenance-records                              list (?field=&q=), create
/// /maintenance-records/{id}                         get, update, delete
/// /maintenance-records/{record_id}/visits           list, create
/// /maintenance-records/{record_id}/visits/{id}      delete
///
/// /calendar-events                                  list, create
/// /calendar-events/{id}                             get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/customers", customer::router())
        .nest("/equipment", equipment::router())
        .nest("/maintenance-records", maintenance_record::router())
        .nest("/calendar-events", calendar_event::router())
}
