//! Handlers for the `/maintenance-records` resource.
//!
//! Every response re-derives both end dates from the record's inputs and
//! adds the equipment age as of the server's "today".

use std::borrow::Cow;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use upkeep_core::contract::ContractDates;
use upkeep_core::dates::{equipment_age, EquipmentAge};
use upkeep_core::error::CoreError;
use upkeep_core::search::{filter_by_field, RecordField, Searchable};
use upkeep_core::types::DbId;
use upkeep_db::models::maintenance_record::{MaintenanceRecordDetail, MaintenanceRecordInput};
use upkeep_db::repositories::MaintenanceRecordRepo;

use crate::error::{AppError, AppResult};
use crate::query::SearchParams;
use crate::state::AppState;

/// A maintenance record as returned by the API.
#[derive(Debug, Serialize)]
pub struct MaintenanceRecordView {
    #[serde(flatten)]
    pub detail: MaintenanceRecordDetail,
    /// e.g. `"2 years 3 months 10 days"`.
    pub equipment_age: String,
}

impl MaintenanceRecordView {
    fn new(mut detail: MaintenanceRecordDetail, today: NaiveDate) -> Self {
        refresh_end_dates(&mut detail);
        let installed = detail.record.installation_date;
        let age = equipment_age(installed, today).unwrap_or_else(|e| {
            tracing::warn!(
                record_id = detail.record.id,
                %installed,
                error = %e,
                "Installation date is in the future, reporting zero age"
            );
            EquipmentAge::ZERO
        });
        Self {
            detail,
            equipment_age: age.to_string(),
        }
    }
}

/// Overwrite the stored end dates with freshly derived ones.
///
/// Stored columns that disagree are served corrected and logged. A row whose
/// inputs no longer derive is served as stored.
fn refresh_end_dates(detail: &mut MaintenanceRecordDetail) {
    let record = &mut detail.record;
    let derived = match ContractDates::derive(
        record.installation_date,
        record.warranty_years,
        record.amc_start_date,
    ) {
        Ok(dates) => dates,
        Err(e) => {
            tracing::warn!(record_id = record.id, error = %e, "Stored record inputs do not derive");
            return;
        }
    };

    if derived.warranty_end_date() != record.warranty_end_date
        || derived.amc_end_date() != record.amc_end_date
    {
        tracing::warn!(
            record_id = record.id,
            stored_warranty_end = %record.warranty_end_date,
            derived_warranty_end = %derived.warranty_end_date(),
            stored_amc_end = ?record.amc_end_date,
            derived_amc_end = ?derived.amc_end_date(),
            "Stored end dates are stale, serving derived values"
        );
        record.warranty_end_date = derived.warranty_end_date();
        record.amc_end_date = derived.amc_end_date();
    }
}

impl Searchable for MaintenanceRecordView {
    type Field = RecordField;

    fn field_value(&self, field: RecordField) -> Option<Cow<'_, str>> {
        let record = &self.detail.record;
        let value = match field {
            RecordField::HospitalName => &self.detail.hospital_name,
            RecordField::EquipmentName => &self.detail.equipment_name,
            RecordField::SerialNo => &record.serial_no,
            RecordField::ServiceStatus => &record.service_status,
            RecordField::Responsibility => &record.responsibility,
            RecordField::EquipmentAge => &self.equipment_age,
        };
        Some(Cow::Borrowed(value.as_str()))
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MaintenanceRecord",
        id,
    })
}

async fn load_view(state: &AppState, id: DbId) -> AppResult<MaintenanceRecordView> {
    let detail = MaintenanceRecordRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(MaintenanceRecordView::new(detail, state.clock.today()))
}

/// POST /api/v1/maintenance-records
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<MaintenanceRecordInput>,
) -> AppResult<(StatusCode, Json<MaintenanceRecordView>)> {
    let draft = input.into_draft()?;
    let record = MaintenanceRecordRepo::create(&state.pool, &draft).await?;
    tracing::info!(
        record_id = record.id,
        warranty_end_date = %record.warranty_end_date,
        amc_end_date = ?record.amc_end_date,
        "Maintenance record created"
    );
    let view = load_view(&state, record.id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/maintenance-records?field=&q=
///
/// Without `q` every record is returned, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<MaintenanceRecordView>>> {
    let field = params.field::<RecordField>()?;
    let today = state.clock.today();
    let views: Vec<MaintenanceRecordView> = MaintenanceRecordRepo::list_detail(&state.pool)
        .await?
        .into_iter()
        .map(|detail| MaintenanceRecordView::new(detail, today))
        .collect();
    Ok(Json(filter_by_field(views, field, params.query())))
}

/// GET /api/v1/maintenance-records/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MaintenanceRecordView>> {
    Ok(Json(load_view(&state, id).await?))
}

/// PUT /api/v1/maintenance-records/{id}
///
/// Replaces the whole record; both end dates are derived again.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MaintenanceRecordInput>,
) -> AppResult<Json<MaintenanceRecordView>> {
    let draft = input.into_draft()?;
    MaintenanceRecordRepo::update(&state.pool, id, &draft)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(load_view(&state, id).await?))
}

/// DELETE /api/v1/maintenance-records/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if MaintenanceRecordRepo::delete(&state.pool, id).await? {
        tracing::info!(record_id = id, "Maintenance record deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
