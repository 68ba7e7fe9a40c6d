//! Tariff definition models.
//!
//! This module contains the [`TariffDefinition`] type and its rate steps.
//! A tariff turns a consumption quantity into a monetary amount; how it does
//! so depends on its [`TariffKind`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The pricing rule a tariff applies.
///
/// # Example
///
/// ```
/// use tariff_engine::models::TariffKind;
///
/// let kind: TariffKind = serde_json::from_str("\"base_price\"").unwrap();
/// assert_eq!(kind, TariffKind::BasePrice);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffKind {
    /// Flat per-unit rate applied to the whole quantity.
    Consumption,
    /// Flat periodic fee, independent of the quantity.
    BasePrice,
    /// Stepped per-unit rate by consumption band.
    Tiered,
}

impl TariffKind {
    /// Returns the snake_case name used in configuration and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            TariffKind::Consumption => "consumption",
            TariffKind::BasePrice => "base_price",
            TariffKind::Tiered => "tiered",
        }
    }
}

/// A single rate step of a tariff.
///
/// Flat tariffs carry one step covering `[0, unbounded)`. Tiered tariffs
/// carry one step per consumption band; `upper_bound` of `None` means the
/// band is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateStep {
    /// The rate per unit (or the full fee for base prices).
    pub rate: Decimal,
    /// The unit of the rate, e.g. "€/kWh" or "€/month".
    pub unit: String,
    /// Inclusive lower bound of the band.
    #[serde(default)]
    pub lower_bound: Decimal,
    /// Exclusive upper bound of the band, `None` when unbounded.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
}

impl RateStep {
    /// Creates a step covering `[0, unbounded)`.
    pub fn flat(rate: Decimal, unit: impl Into<String>) -> Self {
        Self {
            rate,
            unit: unit.into(),
            lower_bound: Decimal::ZERO,
            upper_bound: None,
        }
    }

    /// Creates a band step.
    pub fn band(
        rate: Decimal,
        unit: impl Into<String>,
        lower_bound: Decimal,
        upper_bound: Option<Decimal>,
    ) -> Self {
        Self {
            rate,
            unit: unit.into(),
            lower_bound,
            upper_bound,
        }
    }

    /// Returns the width of the band, `None` when unbounded.
    pub fn band_width(&self) -> Option<Decimal> {
        self.upper_bound.map(|upper| upper - self.lower_bound)
    }

    /// Returns the quantity unit of the rate ("kWh" for "€/kWh").
    ///
    /// Units without a `/` are returned unchanged.
    pub fn quantity_unit(&self) -> &str {
        match self.unit.split_once('/') {
            Some((_, quantity)) => quantity.trim(),
            None => self.unit.as_str(),
        }
    }
}

/// A priced rule for converting a consumption quantity into an amount.
///
/// # Example
///
/// ```
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
/// assert!(tariff.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffDefinition {
    /// Unique identifier within the catalog.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The pricing rule.
    pub kind: TariffKind,
    /// First day the tariff applies.
    pub valid_from: NaiveDate,
    /// Last day the tariff applies.
    pub valid_to: NaiveDate,
    /// Ordered rate steps.
    pub rate_steps: Vec<RateStep>,
}

impl TariffDefinition {
    /// Returns true if the tariff applies on the given date (bounds inclusive).
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.valid_from <= date && date <= self.valid_to
    }

    /// Returns the first rate step, the only one for flat tariffs.
    pub fn primary_step(&self) -> Option<&RateStep> {
        self.rate_steps.first()
    }

    /// Checks the rate step rules for this tariff's kind.
    ///
    /// The calculator does not call this; the catalog and the config loader
    /// do, so malformed bands never reach a catalog.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTariff` when:
    /// - the id is empty or `valid_from` is after `valid_to`
    /// - there are no rate steps or a lower bound is negative
    /// - a flat tariff does not have exactly one `[0, unbounded)` step
    /// - tiered steps do not start at 0, are not contiguous, have an empty
    ///   band, or are unbounded before the last step
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidTariff {
            tariff_id: self.id.clone(),
            message,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty".to_string()));
        }
        if self.valid_from > self.valid_to {
            return Err(invalid(format!(
                "valid_from {} is after valid_to {}",
                self.valid_from, self.valid_to
            )));
        }
        if self.rate_steps.is_empty() {
            return Err(invalid("at least one rate step is required".to_string()));
        }
        if let Some(step) = self.rate_steps.iter().find(|s| s.lower_bound < Decimal::ZERO) {
            return Err(invalid(format!(
                "lower bound {} must not be negative",
                step.lower_bound
            )));
        }

        match self.kind {
            TariffKind::Consumption | TariffKind::BasePrice => {
                if self.rate_steps.len() != 1 {
                    return Err(invalid(format!(
                        "{} tariff must have exactly one rate step, found {}",
                        self.kind.as_str(),
                        self.rate_steps.len()
                    )));
                }
                let step = &self.rate_steps[0];
                if !step.lower_bound.is_zero() || step.upper_bound.is_some() {
                    return Err(invalid(format!(
                        "{} rate step must cover [0, unbounded)",
                        self.kind.as_str()
                    )));
                }
            }
            TariffKind::Tiered => {
                if !self.rate_steps[0].lower_bound.is_zero() {
                    return Err(invalid(format!(
                        "first band must start at 0, starts at {}",
                        self.rate_steps[0].lower_bound
                    )));
                }
                let last = self.rate_steps.len() - 1;
                for (index, step) in self.rate_steps.iter().enumerate() {
                    match step.upper_bound {
                        None if index != last => {
                            return Err(invalid(format!(
                                "band {} is unbounded but is not the last band",
                                index + 1
                            )));
                        }
                        None => {}
                        Some(_) if index == last => {
                            return Err(invalid("last band must be unbounded".to_string()));
                        }
                        Some(upper) => {
                            if upper <= step.lower_bound {
                                return Err(invalid(format!(
                                    "band {} is empty: upper bound {} is not above lower bound {}",
                                    index + 1,
                                    upper,
                                    step.lower_bound
                                )));
                            }
                            let next = &self.rate_steps[index + 1];
                            if next.lower_bound != upper {
                                return Err(invalid(format!(
                                    "bands {} and {} are not contiguous: {} != {}",
                                    index + 1,
                                    index + 2,
                                    upper,
                                    next.lower_bound
                                )));
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
