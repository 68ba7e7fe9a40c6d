//! Price calculation result models.
//!
//! This module contains the [`PriceCalculationResult`] type produced by the
//! pricing calculator and its [`PriceLineItem`]s. Results are created fresh on
//! every calculation and carry no identity of their own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One priced contribution to a total, attributable to a single tariff.
///
/// # Example
///
/// ```
/// use tariff_engine::models::PriceLineItem;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let line = PriceLineItem {
///     tariff_id: "T001".to_string(),
///     amount: Decimal::from_str("1400.00").unwrap(),
///     description: "4000 kWh × 0.35 €/kWh".to_string(),
/// };
/// assert_eq!(line.tariff_id, "T001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLineItem {
    /// The id of the tariff that produced this line.
    pub tariff_id: String,
    /// The computed amount, negative for rebate-style tariffs.
    pub amount: Decimal,
    /// Human-readable breakdown; tiered tariffs use one line per band.
    pub description: String,
}

/// The result of a price calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceCalculationResult {
    /// The consumption quantity the calculation was made for.
    pub consumption_quantity: Decimal,
    /// One line per selected tariff, in selection order.
    pub line_items: Vec<PriceLineItem>,
    /// Sum of all line item amounts.
    pub total_amount: Decimal,
}

impl PriceCalculationResult {
    /// Builds a result from line items, summing their amounts.
    pub fn from_line_items(consumption_quantity: Decimal, line_items: Vec<PriceLineItem>) -> Self {
        let total_amount = line_items.iter().map(|line| line.amount).sum();
        Self {
            consumption_quantity,
            line_items,
            total_amount,
        }
    }

    /// Returns the line item produced by the given tariff, if any.
    pub fn line_for(&self, tariff_id: &str) -> Option<&PriceLineItem> {
        self.line_items.iter().find(|line| line.tariff_id == tariff_id)
    }
}
