//! Price calculation across a selection of tariffs.
//!
//! This is the entry point of the pricing calculator: it dispatches every
//! selected tariff to the calculation for its kind and assembles the line
//! items into a [`PriceCalculationResult`].

use rust_decimal::Decimal;

use crate::models::{PriceCalculationResult, TariffDefinition, TariffKind};

use super::base_price::calculate_base_price;
use super::consumption::calculate_consumption_price;
use super::tiered::calculate_tiered_price;

/// Calculates the price of a consumption quantity under the selected tariffs.
///
/// Line items are produced in the order the tariffs are supplied, one per
/// tariff. The calculation is pure and never fails: an empty selection
/// yields no line items and a total of zero.
///
/// Resolving tariff ids (and skipping unknown ones) happens before this
/// call, see [`crate::catalog::TariffCatalog::calculate`].
///
/// # Arguments
///
/// * `consumption_quantity` - The consumption to price; callers reject
///   negative values before calling
/// * `selected_tariffs` - The tariffs to apply, in display order
///
/// # Examples
///
/// ```
/// use tariff_engine::calculation::calculate_price;
/// use tariff_engine::models::{RateStep, TariffDefinition, TariffKind};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let tariff = |id: &str, kind, rate: &str, unit: &str| TariffDefinition {
///     id: id.to_string(),
///     name: id.to_string(),
///     kind,
///     valid_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     valid_to: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
///     rate_steps: vec![RateStep::flat(dec(rate), unit)],
/// };
///
/// let tariffs = vec![
///     tariff("T001", TariffKind::Consumption, "0.35", "€/kWh"),
///     tariff("T002", TariffKind::BasePrice, "12.50", "€/month"),
/// ];
///
/// let result = calculate_price(dec("4000"), &tariffs);
/// assert_eq!(result.line_items.len(), 2);
/// assert_eq!(result.total_amount, dec("1412.50"));
/// ```
pub fn calculate_price<'a, I>(consumption_quantity: Decimal, selected_tariffs: I) -> PriceCalculationResult
where
    I: IntoIterator<Item = &'a TariffDefinition>,
{
    let line_items = selected_tariffs
        .into_iter()
        .map(|tariff| match tariff.kind {
            TariffKind::Consumption => calculate_consumption_price(consumption_quantity, tariff),
            TariffKind::BasePrice => calculate_base_price(tariff),
            TariffKind::Tiered => calculate_tiered_price(consumption_quantity, tariff).line_item,
        })
        .collect();

    PriceCalculationResult::from_line_items(consumption_quantity, line_items)
}
