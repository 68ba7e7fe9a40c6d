//! HTTP request handlers for the Tariff Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::billing::{MeterReadingLog, simulate_billing};
use crate::calculation::calculate_price;
use crate::error::EngineResult;
use crate::models::{BillingDocument, Contract, TariffDefinition};

use super::request::{BillingSimulationRequest, PriceCalculationRequest, TariffQuery};
use super::response::{ApiError, ApiErrorResponse, PriceCalculationResponse, TariffListResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/tariffs", get(list_tariffs_handler))
        .route("/billing/simulate", post(simulate_billing_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Prices the consumption quantity under the selected tariffs. Unknown ids,
/// and ids not valid on `active_on` when given, are skipped and reported.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<PriceCalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_error(rejection, correlation_id),
            );
        }
    };

    if let Err(err) = request.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Consumption quantity out of range"
        );
        let api_error: ApiErrorResponse = err.into();
        return json_response(api_error.status, api_error.error);
    }

    let start_time = Instant::now();
    let catalog = state.config().catalog();
    let selection = match request.active_on {
        Some(date) => catalog.select_active(&request.selected_tariffs, date),
        None => catalog.select(&request.selected_tariffs),
    };
    if !selection.skipped.is_empty() {
        warn!(
            correlation_id = %correlation_id,
            skipped = ?selection.skipped,
            "Skipped tariffs not available for calculation"
        );
    }
    let result = calculate_price(request.consumption_quantity, selection.tariffs);

    info!(
        correlation_id = %correlation_id,
        consumption_quantity = %result.consumption_quantity,
        line_items = result.line_items.len(),
        total_amount = %result.total_amount,
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );

    json_response(
        StatusCode::OK,
        PriceCalculationResponse {
            calculation_id: correlation_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            skipped_tariffs: selection.skipped,
            result,
        },
    )
}

/// Handler for GET /tariffs endpoint.
///
/// Lists the catalog, optionally only the tariffs valid on `active_on`.
async fn list_tariffs_handler(
    State(state): State<AppState>,
    Query(query): Query<TariffQuery>,
) -> Response {
    let config = state.config();
    let tariffs: Vec<TariffDefinition> = match query.active_on {
        Some(date) => config.catalog().active_on(date).into_iter().cloned().collect(),
        None => config.catalog().iter().cloned().collect(),
    };
    info!(tariffs = tariffs.len(), active_on = ?query.active_on, "Listing tariffs");

    json_response(
        StatusCode::OK,
        TariffListResponse {
            catalog: config.metadata().code.clone(),
            currency: config.metadata().currency.clone(),
            tariffs,
        },
    )
}

/// Handler for POST /billing/simulate endpoint.
///
/// Simulates a billing document for the contract. The document is not
/// stored and carries the request's correlation id as its id.
async fn simulate_billing_handler(
    State(state): State<AppState>,
    payload: Result<Json<BillingSimulationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing billing simulation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_error(rejection, correlation_id),
            );
        }
    };

    match perform_billing(&state, correlation_id, request) {
        Ok(document) => {
            info!(
                correlation_id = %correlation_id,
                contract_id = %document.contract_id,
                consumption = %document.consumption,
                total_amount = %document.total_amount,
                "Billing simulation completed successfully"
            );
            json_response(StatusCode::OK, document)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Billing simulation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

/// Resolves the request against the loaded configuration and simulates.
///
/// Every selected tariff must exist; `/calculate` skips unknown ids instead.
fn perform_billing(
    state: &AppState,
    correlation_id: Uuid,
    request: BillingSimulationRequest,
) -> EngineResult<BillingDocument> {
    let config = state.config();
    request.validate_readings()?;
    let billing = request.billing_config(config.billing())?;

    let tariffs = request
        .selected_tariffs
        .iter()
        .map(|id| config.get_tariff(id))
        .collect::<EngineResult<Vec<&TariffDefinition>>>()?;

    let readings = MeterReadingLog::from_readings(request.readings.into_iter().map(Into::into))?;
    let contract: Contract = request.contract.into();

    simulate_billing(
        correlation_id.to_string(),
        &contract,
        &readings,
        tariffs,
        &billing,
    )
}

/// Maps a JSON extraction failure to an API error.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
