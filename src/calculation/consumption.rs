//! Flat consumption price calculation.
//!
//! A consumption tariff charges one rate per unit for the whole quantity.

use rust_decimal::Decimal;

use crate::models::{PriceLineItem, TariffDefinition};

/// Description used when a tariff has no rate step to price with.
pub const NO_RATE_DESCRIPTION: &str = "No rate defined";

/// Calculates the line item for a consumption tariff.
///
/// `amount = consumption_quantity * rate` using the tariff's single rate
/// step. A negative quantity gives a negative amount; rejecting it is the
/// caller's responsibility.
///
/// # Examples
///
/// ```
/// use tariff_engine::calculation::calculate_consumption_price;
/// use tariff_engine::models::{RateStep, TariffDefinition, TariffKind};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tariff = TariffDefinition {
///     id: "T001".to_string(),
///     name: "Energy price basic".to_string(),
///     kind: TariffKind::Consumption,
///     valid_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     valid_to: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
///     rate_steps: vec![RateStep::flat(Decimal::from_str("0.35").unwrap(), "€/kWh")],
/// };
///
/// let line = calculate_consumption_price(Decimal::from(4000), &tariff);
/// assert_eq!(line.amount, Decimal::from_str("1400.00").unwrap());
/// assert_eq!(line.description, "4000 kWh × 0.35 €/kWh");
/// ```
pub fn calculate_consumption_price(
    consumption_quantity: Decimal,
    tariff: &TariffDefinition,
) -> PriceLineItem {
    let Some(step) = tariff.primary_step() else {
        return PriceLineItem {
            tariff_id: tariff.id.clone(),
            amount: Decimal::ZERO,
            description: NO_RATE_DESCRIPTION.to_string(),
        };
    };

    let amount = consumption_quantity * step.rate;

    PriceLineItem {
        tariff_id: tariff.id.clone(),
        amount,
        description: format!(
            "{} {} × {} {}",
            consumption_quantity.normalize(),
            step.quantity_unit(),
            step.rate.normalize(),
            step.unit
        ),
    }
}
