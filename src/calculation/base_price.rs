//! Base price calculation.
//!
//! A base price is a flat fee per billing period. The stored rate is the
//! full-period charge; multiplying it by a number of periods is left to the
//! caller (see [`crate::billing::simulate_billing`]).

use rust_decimal::Decimal;

use crate::calculation::consumption::NO_RATE_DESCRIPTION;
use crate::models::{PriceLineItem, TariffDefinition};

/// Calculates the line item for a base price tariff.
///
/// The consumption quantity does not affect the amount.
///
/// # Examples
///
/// ```
/// use tariff_engine::calculation::calculate_base_price;
/// use tariff_engine::models::{RateStep, TariffDefinition, TariffKind};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tariff = TariffDefinition {
///     id: "T002".to_string(),
///     name: "Base price basic".to_string(),
///     kind: TariffKind::BasePrice,
///     valid_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     valid_to: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
///     rate_steps: vec![RateStep::flat(Decimal::from_str("12.50").unwrap(), "€/month")],
/// };
///
/// let line = calculate_base_price(&tariff);
/// assert_eq!(line.amount, Decimal::from_str("12.50").unwrap());
/// assert_eq!(line.description, "Base price: 12.5 €/month");
/// ```
pub fn calculate_base_price(tariff: &TariffDefinition) -> PriceLineItem {
    match tariff.primary_step() {
        Some(step) => PriceLineItem {
            tariff_id: tariff.id.clone(),
            amount: step.rate,
            description: format!("Base price: {} {}", step.rate.normalize(), step.unit),
        },
        None => PriceLineItem {
            tariff_id: tariff.id.clone(),
            amount: Decimal::ZERO,
            description: NO_RATE_DESCRIPTION.to_string(),
        },
    }
}
