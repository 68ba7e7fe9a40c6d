//! Tiered ("Staffel") price calculation.
//!
//! This module walks the consumption bands of a tiered tariff in ascending
//! order and charges each band's rate only for the quantity that falls into
//! that band.
//!
//! ## Band Walk
//!
//! For a tariff with bands `[0, 10000) @ 0.32`, `[10000, 50000) @ 0.30` and
//! `[50000, ∞) @ 0.28`, a consumption of 60000 kWh is charged as:
//! - 10000 kWh × 0.32 = 3200
//! - 40000 kWh × 0.30 = 12000
//! - 10000 kWh × 0.28 = 2800
//!
//! The bands are not validated here. Gaps or overlaps produce whatever the
//! walk produces; [`TariffDefinition::validate`] rejects them at the catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PriceLineItem, TariffDefinition};

/// The charge for the quantity that fell into one band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCharge {
    /// 1-based position of the band in the tariff.
    pub band_number: usize,
    /// Lower bound of the band.
    pub lower_bound: Decimal,
    /// Upper bound of the band, `None` when unbounded.
    pub upper_bound: Option<Decimal>,
    /// Quantity charged in this band.
    pub quantity: Decimal,
    /// The band's rate.
    pub rate: Decimal,
    /// `quantity * rate`.
    pub amount: Decimal,
}

/// The result of a tiered price calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredPriceResult {
    /// The line item for the whole tariff.
    pub line_item: PriceLineItem,
    /// Charges for every band that received consumption.
    pub band_charges: Vec<BandCharge>,
}

/// Calculates a tiered tariff's price by walking its bands.
///
/// Bands that receive no consumption are omitted from both the description
/// and `band_charges`. A zero or negative quantity charges nothing.
///
/// # Examples
///
/// ```
/// use tariff_engine::calculation::calculate_tiered_price;
/// use tariff_engine::models::{RateStep, TariffDefinition, TariffKind};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let tariff = TariffDefinition {
///     id: "T003".to_string(),
///     name: "Tiered price business customers".to_string(),
///     kind: TariffKind::Tiered,
///     valid_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     valid_to: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
///     rate_steps: vec![
///         RateStep::band(dec("0.32"), "€/kWh", dec("0"), Some(dec("10000"))),
///         RateStep::band(dec("0.30"), "€/kWh", dec("10000"), Some(dec("50000"))),
///         RateStep::band(dec("0.28"), "€/kWh", dec("50000"), None),
///     ],
/// };
///
/// let result = calculate_tiered_price(dec("60000"), &tariff);
/// assert_eq!(result.line_item.amount, dec("18000"));
/// assert_eq!(result.band_charges.len(), 3);
/// ```
pub fn calculate_tiered_price(
    consumption_quantity: Decimal,
    tariff: &TariffDefinition,
) -> TieredPriceResult {
    let mut remaining = consumption_quantity;
    let mut amount = Decimal::ZERO;
    let mut band_charges = Vec::new();
    let mut fragments = Vec::new();

    for (index, step) in tariff.rate_steps.iter().enumerate() {
        if remaining <= Decimal::ZERO {
            break;
        }

        let available = remaining.max(Decimal::ZERO);
        let consumed = match step.band_width() {
            Some(width) => available.min(width),
            None => available,
        };

        if consumed > Decimal::ZERO {
            let band_amount = consumed * step.rate;
            amount += band_amount;

            let quantity_unit = step.quantity_unit();
            let upper = match step.upper_bound {
                Some(upper) => upper.normalize().to_string(),
                None => "∞".to_string(),
            };
            fragments.push(format!(
                "{} {} × {} {} ({}-{} {})",
                consumed.normalize(),
                quantity_unit,
                step.rate.normalize(),
                step.unit,
                step.lower_bound.normalize(),
                upper,
                quantity_unit
            ));
            band_charges.push(BandCharge {
                band_number: index + 1,
                lower_bound: step.lower_bound,
                upper_bound: step.upper_bound,
                quantity: consumed,
                rate: step.rate,
                amount: band_amount,
            });

            remaining -= consumed;
        }
    }

    TieredPriceResult {
        line_item: PriceLineItem {
            tariff_id: tariff.id.clone(),
            amount,
            description: fragments.join("\n"),
        },
        band_charges,
    }
}
