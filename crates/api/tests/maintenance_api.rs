//! HTTP-level integration tests for maintenance records and their visit log.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener. The clock is frozen at 2025-06-15 unless a
//! test builds its own app.

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a customer and an equipment entry, returning their ids.
async fn seed_parents(pool: &PgPool, hospital: &str) -> (i64, i64) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/customers",
        json!({
            "hospital_name": hospital,
            "email": "biomed@hospital.example",
            "contact_info": "+1 555 0100",
            "hod_name": "Dr. Rao"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let customer_id = body_json(response).await["id"].as_i64().unwrap();

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/equipment",
        json!({
            "name": "Hematology Analyzer",
            "model_number": "HA-5",
            "buy_price": 9500.0
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let equipment_id = body_json(response).await["id"].as_i64().unwrap();

    (customer_id, equipment_id)
}

fn record_body(customer_id: i64, equipment_id: i64) -> Value {
    json!({
        "customer_id": customer_id,
        "equipment_id": equipment_id,
        "serial_no": "SN-0001",
        "installation_date": "2022-03-10",
        "warranty_years": 2,
        "service_status": "AMC",
        "amc_start_date": "2024-03-10",
        "invoice_amount": 450.0,
        "responsibility": "North zone"
    })
}

async fn create_record(pool: &PgPool, body: Value) -> Value {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/maintenance-records",
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_returns_derived_dates_and_age(pool: PgPool) {
    let (customer_id, equipment_id) = seed_parents(&pool, "City Hospital").await;

    let json = create_record(&pool, record_body(customer_id, equipment_id)).await;

    assert!(json["id"].is_number());
    assert_eq!(json["warranty_end_date"], "2024-03-10");
    assert_eq!(json["amc_end_date"], "2025-03-10");
    assert_eq!(json["service_status"], "AMC");
    assert_eq!(json["hospital_name"], "City Hospital");
    assert_eq!(json["equipment_name"], "Hematology Analyzer");
    assert_eq!(json["equipment_age"], "3 years 3 months 7 days");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn client_supplied_end_dates_are_ignored(pool: PgPool) {
    let (customer_id, equipment_id) = seed_parents(&pool, "City Hospital").await;
    let mut body = record_body(customer_id, equipment_id);
    body["warranty_end_date"] = json!("2099-01-01");
    body["amc_end_date"] = json!("2099-01-01");

    let json = create_record(&pool, body).await;

    assert_eq!(json["warranty_end_date"], "2024-03-10");
    assert_eq!(json["amc_end_date"], "2025-03-10");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn record_without_amc_has_null_amc_end_date(pool: PgPool) {
    let (customer_id, equipment_id) = seed_parents(&pool, "City Hospital").await;
    let mut body = record_body(customer_id, equipment_id);
    body["amc_start_date"] = Value::Null;
    body["service_status"] = json!("warranty");

    let json = create_record(&pool, body).await;

    assert!(json["amc_start_date"].is_null());
    assert!(json["amc_end_date"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn age_is_measured_against_the_server_clock(pool: PgPool) {
    let (customer_id, equipment_id) = seed_parents(&pool, "City Hospital").await;
    let mut body = record_body(customer_id, equipment_id);
    body["installation_date"] = json!("2020-01-15");
    let id = create_record(&pool, body).await["id"].as_i64().unwrap();

    let today = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
    let app = common::build_test_app_at(pool, today);
    let response = get(app, &format!("/api/v1/maintenance-records/{id}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["equipment_age"], "3 years 0 months 0 days");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn future_installation_reports_zero_age(pool: PgPool) {
    let (customer_id, equipment_id) = seed_parents(&pool, "City Hospital").await;
    let mut body = record_body(customer_id, equipment_id);
    body["installation_date"] = json!("2026-01-01");
    body["amc_start_date"] = Value::Null;

    let json = create_record(&pool, body).await;

    assert_eq!(json["equipment_age"], "0 years 0 months 0 days");
    assert_eq!(json["warranty_end_date"], "2028-01-01");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_nonexistent_record_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/maintenance-records/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stale_stored_end_dates_are_derived_again_on_read(pool: PgPool) {
    let (customer_id, equipment_id) = seed_parents(&pool, "City Hospital").await;
    let id = create_record(&pool, record_body(customer_id, equipment_id)).await["id"]
        .as_i64()
        .unwrap();

    // Written behind the repository's back, e.g. by a restored dump.
    sqlx::query(
        "UPDATE maintenance_records \
         SET warranty_end_date = '2030-01-01', amc_end_date = '2030-01-01' \
         WHERE id = $1",
    )
    .bind(id)
    .execute(&pool)
    .await
    .unwrap();

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/maintenance-records/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["warranty_end_date"], "2024-03-10");
    assert_eq!(json["amc_end_date"], "2025-03-10");

    let response = get(common::build_test_app(pool), "/api/v1/maintenance-records").await;
    let json = body_json(response).await;
    assert_eq!(json[0]["warranty_end_date"], "2024-03-10");
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn warranty_years_outside_options_is_rejected(pool: PgPool) {
    let (customer_id, equipment_id) = seed_parents(&pool, "City Hospital").await;

    for years in [0, -1, 7] {
        let mut body = record_body(customer_id, equipment_id);
        body["warranty_years"] = json!(years);
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/api/v1/maintenance-records", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "years = {years}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_installation_date_is_rejected(pool: PgPool) {
    let (customer_id, equipment_id) = seed_parents(&pool, "City Hospital").await;
    let mut body = record_body(customer_id, equipment_id);
    body["installation_date"] = json!("2024-13-01");

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/maintenance-records", body).await;

    // Rejected by the JSON extractor before reaching the handler.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_customer_is_a_validation_error(pool: PgPool) {
    let (_, equipment_id) = seed_parents(&pool, "City Hospital").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/maintenance-records",
        record_body(999_999, equipment_id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn update_rederives_end_dates(pool: PgPool) {
    let (customer_id, equipment_id) = seed_parents(&pool, "City Hospital").await;
    let id = create_record(&pool, record_body(customer_id, equipment_id)).await["id"]
        .as_i64()
        .unwrap();

    let mut body = record_body(customer_id, equipment_id);
    body["warranty_years"] = json!(5);
    body["amc_start_date"] = json!("2025-01-31");

    let app = common::build_test_app(pool);
    let response = put_json(app, &format!("/api/v1/maintenance-records/{id}"), body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["warranty_end_date"], "2027-03-10");
    assert_eq!(json["amc_end_date"], "2026-01-31");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_nonexistent_record_returns_404(pool: PgPool) {
    let (customer_id, equipment_id) = seed_parents(&pool, "City Hospital").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/maintenance-records/999999",
        record_body(customer_id, equipment_id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_record_then_get_returns_404(pool: PgPool) {
    let (customer_id, equipment_id) = seed_parents(&pool, "City Hospital").await;
    let id = create_record(&pool, record_body(customer_id, equipment_id)).await["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/api/v1/maintenance-records/{id}");

    let response = delete(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(common::build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

async fn seed_two_hospitals(pool: &PgPool) {
    let (city, equipment_id) = seed_parents(pool, "City Hospital").await;
    create_record(pool, record_body(city, equipment_id)).await;

    let (lakeside, equipment_id) = seed_parents(pool, "Lakeside Clinic").await;
    let mut body = record_body(lakeside, equipment_id);
    body["serial_no"] = json!("LK-77");
    body["installation_date"] = json!("2025-01-15");
    body["amc_start_date"] = Value::Null;
    body["service_status"] = json!("On call service");
    create_record(pool, body).await;
}

async fn search(pool: &PgPool, query: &str) -> (StatusCode, Value) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/maintenance-records{query}")).await;
    let status = response.status();
    (status, body_json(response).await)
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_without_query_returns_everything(pool: PgPool) {
    seed_two_hospitals(&pool).await;

    let (status, json) = search(&pool, "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_defaults_to_hospital_name_case_insensitively(pool: PgPool) {
    seed_two_hospitals(&pool).await;

    let (status, json) = search(&pool, "?q=LAKESIDE").await;

    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["hospital_name"], "Lakeside Clinic");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_is_scoped_to_the_selected_field(pool: PgPool) {
    seed_two_hospitals(&pool).await;

    let (_, by_serial) = search(&pool, "?field=serial_no&q=lk-").await;
    assert_eq!(by_serial.as_array().unwrap().len(), 1);

    let (_, hospital_text_in_serial) = search(&pool, "?field=serial_no&q=City").await;
    assert!(hospital_text_in_serial.as_array().unwrap().is_empty());

    let (_, by_status) = search(&pool, "?field=service_status&q=on%20call").await;
    assert_eq!(by_status.as_array().unwrap()[0]["serial_no"], "LK-77");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_by_equipment_age_matches_rendered_text(pool: PgPool) {
    seed_two_hospitals(&pool).await;

    let (_, json) = search(&pool, "?field=equipment_age&q=0%20years").await;

    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["equipment_age"], "0 years 5 months 1 day");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_search_field_is_rejected(pool: PgPool) {
    let (status, json) = search(&pool, "?field=invoice_amount&q=1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Service visits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn visits_are_listed_newest_first(pool: PgPool) {
    let (customer_id, equipment_id) = seed_parents(&pool, "City Hospital").await;
    let id = create_record(&pool, record_body(customer_id, equipment_id)).await["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/api/v1/maintenance-records/{id}/visits");

    for visit_date in ["2024-01-05", "2024-08-20", "2024-04-02"] {
        let response = post_json(
            common::build_test_app(pool.clone()),
            &uri,
            json!({
                "visit_date": visit_date,
                "technician_name": "Arun",
                "description": "Preventive maintenance"
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(common::build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let dates: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["visit_date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-08-20", "2024-04-02", "2024-01-05"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn visit_on_missing_record_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/maintenance-records/999999/visits",
        json!({ "visit_date": "2024-01-05", "technician_name": "Arun" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn visit_without_technician_is_rejected(pool: PgPool) {
    let (customer_id, equipment_id) = seed_parents(&pool, "City Hospital").await;
    let id = create_record(&pool, record_body(customer_id, equipment_id)).await["id"]
        .as_i64()
        .unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/maintenance-records/{id}/visits"),
        json!({ "visit_date": "2024-01-05", "technician_name": "" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_visit_is_scoped_to_its_record(pool: PgPool) {
    let (customer_id, equipment_id) = seed_parents(&pool, "City Hospital").await;
    let first = create_record(&pool, record_body(customer_id, equipment_id)).await["id"]
        .as_i64()
        .unwrap();
    let second = create_record(&pool, record_body(customer_id, equipment_id)).await["id"]
        .as_i64()
        .unwrap();

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/maintenance-records/{first}/visits"),
        json!({ "visit_date": "2024-02-01", "technician_name": "Meera" }),
    )
    .await;
    let visit_id = body_json(response).await["id"].as_i64().unwrap();

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/maintenance-records/{second}/visits/{visit_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(
        common::build_test_app(pool),
        &format!("/api/v1/maintenance-records/{first}/visits/{visit_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
