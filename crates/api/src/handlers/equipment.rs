//! Handlers for the `/equipment` catalog.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use upkeep_core::error::CoreError;
use upkeep_core::search::{filter_by_field, EquipmentField};
use upkeep_core::types::DbId;
use upkeep_db::models::equipment::{Equipment, EquipmentInput};
use upkeep_db::models::validation_error;
use upkeep_db::repositories::EquipmentRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::SearchParams;
use crate::state::AppState;

/// POST /api/v1/equipment
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<EquipmentInput>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    input.validate().map_err(validation_error)?;
    let equipment = EquipmentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// GET /api/v1/equipment?field=&q=
///
/// `field` defaults to `name`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Equipment>>> {
    let field = params.field::<EquipmentField>()?;
    let equipment = EquipmentRepo::list(&state.pool).await?;
    Ok(Json(filter_by_field(equipment, field, params.query())))
}

/// GET /api/v1/equipment/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Equipment>> {
    let equipment = EquipmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }))?;
    Ok(Json(equipment))
}

/// PUT /api/v1/equipment/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<EquipmentInput>,
) -> AppResult<Json<Equipment>> {
    input.validate().map_err(validation_error)?;
    let equipment = EquipmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }))?;
    Ok(Json(equipment))
}

/// DELETE /api/v1/equipment/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = EquipmentRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }))
    }
}
