//! Handlers for the `/calendar-events` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use upkeep_core::error::CoreError;
use upkeep_core::types::DbId;
use upkeep_db::models::calendar_event::{CalendarEvent, CalendarEventInput};
use upkeep_db::models::validation_error;
use upkeep_db::repositories::CalendarEventRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "CalendarEvent",
        id,
    })
}

/// POST /api/v1/calendar-events
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CalendarEventInput>,
) -> AppResult<(StatusCode, Json<CalendarEvent>)> {
    input.validate().map_err(validation_error)?;
    let event = CalendarEventRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/v1/calendar-events
///
/// Ordered by start time, earliest first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CalendarEvent>>> {
    let events = CalendarEventRepo::list(&state.pool).await?;
    Ok(Json(events))
}

/// GET /api/v1/calendar-events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CalendarEvent>> {
    let event = CalendarEventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(event))
}

/// PUT /api/v1/calendar-events/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CalendarEventInput>,
) -> AppResult<Json<CalendarEvent>> {
    input.validate().map_err(validation_error)?;
    let event = CalendarEventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(event))
}

/// DELETE /api/v1/calendar-events/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if CalendarEventRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
