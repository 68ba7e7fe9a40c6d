//! Tariff and billing engine for utility consumption pricing
//!
//! This crate prices a consumption quantity (e.g. kWh) against a selection
//! of tariffs: flat consumption prices, fixed base prices and tiered band
//! prices. Around the calculator it provides a validated tariff catalog,
//! YAML configuration, billing simulation over meter readings and an HTTP
//! API.

#![warn(missing_docs)]

pub mod api;
pub mod billing;
pub mod calculation;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initializes tracing with an `RUST_LOG` style filter, `info` by default.
///
/// Can only be called once per process.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
