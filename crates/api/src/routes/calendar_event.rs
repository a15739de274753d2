//! Route definitions for the `/calendar-events` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::calendar_event;
use crate::state::AppState;

/// Routes mounted at `/calendar-events`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(calendar_event::list).post(calendar_event::create))
        .route(
            "/{id}",
            get(calendar_event::get_by_id)
                .put(calendar_event::update)
                .delete(calendar_event::delete),
        )
}
