//! Route definitions for the `/maintenance-records` resource.
//!
//! Also nests the service visit log under `/{record_id}/visits`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{maintenance_record, service_visit};
use crate::state::AppState;

/// Routes mounted at `/maintenance-records`.
///
/// ```text
/// GET    /                              -> list (?field=&q=)
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
///
/// GET    /{record_id}/visits            -> list_by_record
/// POST   /{record_id}/visits            -> create
/// DELETE /{record_id}/visits/{id}       -> delete
/// ```
pub fn router() -> Router<AppState> {
    let visit_routes = Router::new()
        .route(
            "/",
            get(service_visit::list_by_record).post(service_visit::create),
        )
        .route("/{id}", delete(service_visit::delete));

    Router::new()
        .route(
            "/",
            get(maintenance_record::list).post(maintenance_record::create),
        )
        .route(
            "/{id}",
            get(maintenance_record::get_by_id)
                .put(maintenance_record::update)
                .delete(maintenance_record::delete),
        )
        .nest("/{record_id}/visits", visit_routes)
}
