//! HTTP API module for the Tariff Engine.
//!
//! This module provides the REST API endpoints for pricing consumption,
//! listing the tariff catalog and simulating billing documents.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BillingSimulationRequest, ContractRequest, MeterReadingRequest, PriceCalculationRequest,
    TariffQuery,
};
pub use response::{ApiError, PriceCalculationResponse, TariffListResponse};
pub use state::AppState;
