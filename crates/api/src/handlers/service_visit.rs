//! Handlers for service visits nested under a maintenance record.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use upkeep_core::error::CoreError;
use upkeep_core::types::DbId;
use upkeep_db::models::service_visit::{CreateServiceVisit, ServiceVisit};
use upkeep_db::models::validation_error;
use upkeep_db::repositories::{MaintenanceRecordRepo, ServiceVisitRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

async fn ensure_record_exists(state: &AppState, record_id: DbId) -> AppResult<()> {
    MaintenanceRecordRepo::find_detail_by_id(&state.pool, record_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MaintenanceRecord",
            id: record_id,
        }))
}

/// GET /api/v1/maintenance-records/{record_id}/visits
///
/// Newest visit first.
pub async fn list_by_record(
    State(state): State<AppState>,
    Path(record_id): Path<DbId>,
) -> AppResult<Json<Vec<ServiceVisit>>> {
    ensure_record_exists(&state, record_id).await?;
    let visits = ServiceVisitRepo::list_by_record(&state.pool, record_id).await?;
    Ok(Json(visits))
}

/// POST /api/v1/maintenance-records/{record_id}/visits
pub async fn create(
    State(state): State<AppState>,
    Path(record_id): Path<DbId>,
    Json(input): Json<CreateServiceVisit>,
) -> AppResult<(StatusCode, Json<ServiceVisit>)> {
    input.validate().map_err(validation_error)?;
    ensure_record_exists(&state, record_id).await?;
    let visit = ServiceVisitRepo::create(&state.pool, record_id, &input).await?;
    Ok((StatusCode::CREATED, Json(visit)))
}

/// DELETE /api/v1/maintenance-records/{record_id}/visits/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((record_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if ServiceVisitRepo::delete(&state.pool, record_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ServiceVisit",
            id,
        }))
    }
}
