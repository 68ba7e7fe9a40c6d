//! Response types for the Tariff Engine API.
//!
//! This module defines the success bodies, the error response structures
//! and the mapping from engine errors to HTTP errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{PriceCalculationResult, TariffDefinition};

/// Response body of the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceCalculationResponse {
    /// Unique identifier of this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Selected ids that produced no line item.
    pub skipped_tariffs: Vec<String>,
    /// The priced result.
    #[serde(flatten)]
    pub result: PriceCalculationResult,
}

/// Response body of the `/tariffs` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffListResponse {
    /// Code of the loaded catalog.
    pub catalog: String,
    /// Currency the rates are expressed in.
    pub currency: String,
    /// The tariffs in catalog order.
    pub tariffs: Vec<TariffDefinition>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a tariff not found error response.
    pub fn tariff_not_found(tariff_id: &str) -> Self {
        Self::with_details(
            "TARIFF_NOT_FOUND",
            format!("Tariff not found: {}", tariff_id),
            format!("The tariff '{}' is not in the loaded catalog", tariff_id),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::TariffNotFound { tariff_id } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::tariff_not_found(&tariff_id),
            },
            EngineError::DuplicateTariff { tariff_id } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new(
                    "DUPLICATE_TARIFF",
                    format!("Tariff already exists: {}", tariff_id),
                ),
            },
            EngineError::InvalidTariff { tariff_id, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_TARIFF",
                    format!("Invalid tariff '{}'", tariff_id),
                    message,
                ),
            },
            err @ EngineError::IndexOutOfRange { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INDEX_OUT_OF_RANGE", err.to_string()),
            },
            EngineError::InvalidReading { date, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_READING",
                    format!("Invalid meter reading on {}", date),
                    message,
                ),
            },
            err @ EngineError::InsufficientReadings { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INSUFFICIENT_READINGS", err.to_string()),
            },
            EngineError::InvalidDocumentState {
                document_id,
                message,
            } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "INVALID_DOCUMENT_STATE",
                    format!("Billing document '{}' cannot change state", document_id),
                    message,
                ),
            },
            EngineError::InvalidRequest { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(format!("{} {}", field, message)),
            },
            err @ EngineError::AmountOverflow { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "AMOUNT_OVERFLOW",
                    err.to_string(),
                    "The request values produce an amount outside the supported range",
                ),
            },
        }
    }
}
