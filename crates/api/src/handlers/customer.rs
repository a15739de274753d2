//! Handlers for the `/customers` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use upkeep_core::error::CoreError;
use upkeep_core::search::{filter_by_field, CustomerField};
use upkeep_core::types::DbId;
use upkeep_db::models::customer::{Customer, CustomerInput};
use upkeep_db::models::validation_error;
use upkeep_db::repositories::CustomerRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::SearchParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Customer",
        id,
    })
}

/// POST /api/v1/customers
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CustomerInput>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    input.validate().map_err(validation_error)?;
    let customer = CustomerRepo::create(&state.pool, &input).await?;
    tracing::info!(customer_id = customer.id, "Customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET /api/v1/customers?field=&q=
///
/// `field` defaults to `hospital_name`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Customer>>> {
    let field = params.field::<CustomerField>()?;
    let customers = CustomerRepo::list(&state.pool).await?;
    Ok(Json(filter_by_field(customers, field, params.query())))
}

/// GET /api/v1/customers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Customer>> {
    let customer = CustomerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(customer))
}

/// PUT /api/v1/customers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CustomerInput>,
) -> AppResult<Json<Customer>> {
    input.validate().map_err(validation_error)?;
    let customer = CustomerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(customer))
}

/// DELETE /api/v1/customers/{id}
///
/// Also removes the customer's maintenance records and their visits.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if CustomerRepo::delete(&state.pool, id).await? {
        tracing::info!(customer_id = id, "Customer deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
