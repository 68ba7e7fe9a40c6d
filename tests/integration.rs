//! Integration tests for the Tariff Engine.
//!
//! This test suite drives the HTTP API against the `isu_basic` catalog:
//! - Flat consumption and base price tariffs
//! - Tiered band pricing
//! - Selection order and unknown ids
//! - Validity dates
//! - Billing simulation
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use tariff_engine::api::{AppState, create_router};
use tariff_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/isu_basic").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    post_json(router, "/calculate", body).await
}

async fn get_tariffs(router: Router, query: &str) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .uri(format!("/tariffs{}", query))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

fn create_request(quantity: &str, tariffs: Vec<&str>) -> Value {
    json!({
        "consumption_quantity": quantity,
        "selected_tariffs": tariffs
    })
}

fn create_billing_request(readings: Vec<(&str, &str)>, tariffs: Vec<&str>) -> Value {
    let readings: Vec<Value> = readings
        .into_iter()
        .map(|(date, value)| json!({"date": date, "value": value}))
        .collect();
    json!({
        "contract": {
            "id": "V001",
            "partner": "Max Mustermann",
            "address": "Main Street 1, 12345 Town",
            "start_date": "2025-01-01",
            "product": "Electricity Basic",
            "device_id": "Z001"
        },
        "readings": readings,
        "selected_tariffs": tariffs
    })
}

fn amount(value: &Value) -> Decimal {
    decimal(value.as_str().expect("amount should be a decimal string"))
}

fn assert_total(result: &Value, expected: &str) {
    assert_eq!(
        amount(&result["total_amount"]),
        decimal(expected),
        "Expected total_amount {}, got {}",
        expected,
        result["total_amount"]
    );
}

fn line_ids(result: &Value) -> Vec<&str> {
    result["line_items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["tariff_id"].as_str().unwrap())
        .collect()
}

// =============================================================================
// Flat Tariffs
// =============================================================================

#[tokio::test]
async fn test_energy_and_base_price_4000_kwh() {
    let (status, result) =
        post_calculate(create_router_for_test(), create_request("4000", vec!["T001", "T002"]))
            .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(line_ids(&result), vec!["T001", "T002"]);
    assert_eq!(amount(&result["line_items"][0]["amount"]), decimal("1400.00"));
    assert_eq!(amount(&result["line_items"][1]["amount"]), decimal("12.50"));
    assert_total(&result, "1412.50");
    assert_eq!(result["line_items"][0]["description"], "4000 kWh × 0.35 €/kWh");
    assert_eq!(result["line_items"][1]["description"], "Base price: 12.5 €/month");
}

#[tokio::test]
async fn test_consumption_price_is_linear() {
    for (quantity, expected) in [("0", "0"), ("1", "0.35"), ("2500.5", "875.175")] {
        let (_, result) =
            post_calculate(create_router_for_test(), create_request(quantity, vec!["T001"])).await;
        assert_total(&result, expected);
    }
}

#[tokio::test]
async fn test_base_price_ignores_quantity() {
    for quantity in ["0", "1", "100000"] {
        let (_, result) =
            post_calculate(create_router_for_test(), create_request(quantity, vec!["T002"])).await;
        assert_total(&result, "12.50");
    }
}

// =============================================================================
// Tiered Tariffs
// =============================================================================

#[tokio::test]
async fn test_tiered_60000_spans_all_bands() {
    let (status, result) =
        post_calculate(create_router_for_test(), create_request("60000", vec!["T003"])).await;

    assert_eq!(status, StatusCode::OK);
    // 3200 + 12000 + 2800
    assert_total(&result, "18000");
    assert_eq!(
        result["line_items"][0]["description"],
        "10000 kWh × 0.32 €/kWh (0-10000 kWh)\n\
         40000 kWh × 0.3 €/kWh (10000-50000 kWh)\n\
         10000 kWh × 0.28 €/kWh (50000-∞ kWh)"
    );
}

#[tokio::test]
async fn test_tiered_within_first_band() {
    let (_, result) =
        post_calculate(create_router_for_test(), create_request("5000", vec!["T003"])).await;

    assert_total(&result, "1600");
    assert_eq!(
        result["line_items"][0]["description"],
        "5000 kWh × 0.32 €/kWh (0-10000 kWh)"
    );
}

#[tokio::test]
async fn test_tiered_is_continuous_at_band_boundary() {
    let (_, at) =
        post_calculate(create_router_for_test(), create_request("10000", vec!["T003"])).await;
    let (_, after) =
        post_calculate(create_router_for_test(), create_request("10001", vec!["T003"])).await;

    assert_total(&at, "3200");
    assert_eq!(amount(&after["total_amount"]) - amount(&at["total_amount"]), decimal("0.30"));
}

#[tokio::test]
async fn test_tiered_zero_quantity_is_free() {
    let (_, result) =
        post_calculate(create_router_for_test(), create_request("0", vec!["T003"])).await;

    assert_total(&result, "0");
    assert_eq!(result["line_items"][0]["description"], "");
}

// =============================================================================
// Selection
// =============================================================================

#[tokio::test]
async fn test_empty_selection_returns_zero() {
    let (status, result) =
        post_calculate(create_router_for_test(), create_request("4000", vec![])).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["line_items"].as_array().unwrap().is_empty());
    assert_total(&result, "0");
}

#[tokio::test]
async fn test_line_items_follow_selection_order() {
    let (_, result) = post_calculate(
        create_router_for_test(),
        create_request("4000", vec!["T003", "T002", "T001"]),
    )
    .await;

    assert_eq!(line_ids(&result), vec!["T003", "T002", "T001"]);
}

#[tokio::test]
async fn test_unknown_tariff_is_skipped() {
    let (status, result) = post_calculate(
        create_router_for_test(),
        create_request("4000", vec!["T001", "T999", "T002"]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(line_ids(&result), vec!["T001", "T002"]);
    assert_eq!(result["skipped_tariffs"], json!(["T999"]));
    assert_total(&result, "1412.50");
}

#[tokio::test]
async fn test_tariffs_outside_validity_are_skipped() {
    let mut body = create_request("4000", vec!["T001", "T002"]);
    body["active_on"] = json!("2026-01-01");

    let (status, result) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["line_items"].as_array().unwrap().is_empty());
    assert_eq!(result["skipped_tariffs"], json!(["T001", "T002"]));
}

#[tokio::test]
async fn test_response_carries_calculation_metadata() {
    let (_, result) =
        post_calculate(create_router_for_test(), create_request("1", vec!["T001"])).await;

    assert!(result["calculation_id"].as_str().is_some());
    assert!(result["timestamp"].as_str().is_some());
    assert_eq!(result["engine_version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(amount(&result["consumption_quantity"]), decimal("1"));
}

// =============================================================================
// Tariff Listing
// =============================================================================

#[tokio::test]
async fn test_list_all_tariffs() {
    let (status, result) = get_tariffs(create_router_for_test(), "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["catalog"], "ISU_BASIC");
    assert_eq!(result["currency"], "EUR");
    let ids: Vec<&str> = result["tariffs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["T001", "T002", "T003"]);
    assert_eq!(result["tariffs"][2]["kind"], "tiered");
}

#[tokio::test]
async fn test_list_tariffs_active_on_date() {
    let (_, active) = get_tariffs(create_router_for_test(), "?active_on=2025-06-15").await;
    let (_, expired) = get_tariffs(create_router_for_test(), "?active_on=2026-06-15").await;

    assert_eq!(active["tariffs"].as_array().unwrap().len(), 3);
    assert!(expired["tariffs"].as_array().unwrap().is_empty());
}

// =============================================================================
// Billing Simulation
// =============================================================================

#[tokio::test]
async fn test_billing_yearly_settlement() {
    let body = create_billing_request(
        vec![("2025-01-01", "45280"), ("2025-12-31", "49280")],
        vec!["T001", "T002"],
    );

    let (status, document) = post_json(create_router_for_test(), "/billing/simulate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(document["status"], "simulation");
    assert_eq!(document["contract_id"], "V001");
    assert_eq!(amount(&document["consumption"]), decimal("4000"));

    let positions = document["positions"].as_array().unwrap();
    assert_eq!(positions.len(), 3);
    assert_eq!(positions[0]["position_type"], "consumption");
    assert_eq!(amount(&positions[0]["amount"]), decimal("1400"));
    assert_eq!(positions[1]["position_type"], "base_price");
    assert_eq!(amount(&positions[1]["amount"]), decimal("150"));
    assert_eq!(positions[2]["position_type"], "installment");
    assert_eq!(amount(&positions[2]["amount"]), decimal("-780"));
    assert!(positions[2].get("tariff_id").is_none());

    // 1400 + 150 - 780
    assert_eq!(amount(&document["total_amount"]), decimal("770"));
}

#[tokio::test]
async fn test_billing_sorts_readings_by_date() {
    let body = create_billing_request(
        vec![
            ("2025-12-31", "49280"),
            ("2025-01-01", "45280"),
            ("2025-06-30", "47000"),
        ],
        vec!["T001"],
    );

    let (status, document) = post_json(create_router_for_test(), "/billing/simulate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(document["from_date"], "2025-01-01");
    assert_eq!(document["to_date"], "2025-12-31");
    assert_eq!(document["readings"][1]["date"], "2025-06-30");
    assert_eq!(amount(&document["consumption"]), decimal("4000"));
}

#[tokio::test]
async fn test_billing_overrides_installments() {
    let mut body = create_billing_request(
        vec![("2025-01-01", "0"), ("2025-12-31", "60000")],
        vec!["T003"],
    );
    body["installments_paid"] = json!(0);

    let (status, document) = post_json(create_router_for_test(), "/billing/simulate", body).await;

    assert_eq!(status, StatusCode::OK);
    let positions = document["positions"].as_array().unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(amount(&positions[0]["unit_price"]), decimal("0.3"));
    assert_eq!(amount(&document["total_amount"]), decimal("18000"));
}

#[tokio::test]
async fn test_billing_decreasing_reading_returns_400() {
    let body = create_billing_request(
        vec![("2025-01-01", "45280"), ("2025-12-31", "45000")],
        vec!["T001"],
    );

    let (status, error) = post_json(create_router_for_test(), "/billing/simulate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_READING");
}

#[tokio::test]
async fn test_billing_without_readings_returns_400() {
    let body = create_billing_request(vec![], vec!["T001"]);

    let (status, error) = post_json(create_router_for_test(), "/billing/simulate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INSUFFICIENT_READINGS");
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_error_malformed_json() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_error_negative_quantity() {
    let (status, error) =
        post_calculate(create_router_for_test(), create_request("-1", vec!["T001"])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("must not be negative"));
}

#[tokio::test]
async fn test_error_quantity_at_decimal_max() {
    let (status, error) = post_calculate(
        create_router_for_test(),
        create_request("79228162514264337593543950335", vec!["T001", "T001", "T001"]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("must not exceed"));
}

#[tokio::test]
async fn test_quantity_at_ceiling_is_priced() {
    let (status, result) = post_calculate(
        create_router_for_test(),
        create_request("1000000000000", vec!["T001", "T001", "T001", "T002", "T003"]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["line_items"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_error_billing_installment_at_decimal_max() {
    let mut request = create_billing_request(
        vec![("2025-01-01", "45280"), ("2025-12-31", "49280")],
        vec!["T001", "T002"],
    );
    request["installment_amount"] = json!("79228162514264337593543950335");
    request["installments_paid"] = json!(2);

    let (status, error) =
        post_json(create_router_for_test(), "/billing/simulate", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().starts_with("installment_amount"));
}

#[tokio::test]
async fn test_error_billing_months_above_limit() {
    let mut request = create_billing_request(
        vec![("2025-01-01", "45280"), ("2025-12-31", "49280")],
        vec!["T002"],
    );
    request["billing_months"] = json!(1201);

    let (status, error) =
        post_json(create_router_for_test(), "/billing/simulate", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().starts_with("billing_months"));
}

#[tokio::test]
async fn test_error_missing_selected_tariffs() {
    let (status, error) =
        post_calculate(create_router_for_test(), json!({"consumption_quantity": 1})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_error_wrong_type_is_malformed() {
    let (status, error) = post_calculate(
        create_router_for_test(),
        json!({"consumption_quantity": 1, "selected_tariffs": "T001"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}
