//! Core data models for the Tariff Engine.
//!
//! This module contains the tariff definitions, the price calculation
//! results and the billing documents.

mod billing;
mod price_calculation;
mod tariff;

pub use billing::{
    BillingDocument, BillingPosition, BillingStatus, Contract, MeterReading, PositionType,
    ReadingType,
};
pub use price_calculation::{PriceCalculationResult, PriceLineItem};
pub use tariff::{RateStep, TariffDefinition, TariffKind};
