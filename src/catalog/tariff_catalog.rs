//! The tariff catalog.
//!
//! [`TariffCatalog`] holds the tariff definitions available for selection,
//! validates every definition it accepts, and resolves selected ids into the
//! definitions the calculator consumes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::calculation::calculate_price;
use crate::error::{EngineError, EngineResult};
use crate::models::{PriceCalculationResult, RateStep, TariffDefinition, TariffKind};

use super::OrderedCollection;

/// The tariffs resolved from a selection of ids.
#[derive(Debug, Clone)]
pub struct TariffSelection<'a> {
    /// The resolved tariffs, in selection order.
    pub tariffs: Vec<&'a TariffDefinition>,
    /// Selected ids that were not resolved.
    pub skipped: Vec<String>,
}

/// A catalog price calculation, with the ids that were skipped.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogCalculation {
    /// The calculation over the resolved tariffs.
    pub result: PriceCalculationResult,
    /// Selected ids that produced no line item.
    pub skipped: Vec<String>,
}

/// An ordered, validated set of tariff definitions.
///
/// # Example
///
/// ```
/// use tariff_engine::catalog::TariffCatalog;
/// use tariff_engine::models::{RateStep, TariffKind};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut catalog = TariffCatalog::new();
/// let id = catalog
///     .add_with_generated_id(
///         "Energy price basic",
///         TariffKind::Consumption,
///         NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
///         vec![RateStep::flat(Decimal::from_str("0.35").unwrap(), "€/kWh")],
///     )
///     .unwrap();
/// assert_eq!(id, "T001");
///
/// let calculation = catalog.calculate(Decimal::from(4000), &["T001", "T404"]);
/// assert_eq!(calculation.result.line_items.len(), 1);
/// assert_eq!(calculation.skipped, vec!["T404".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TariffCatalog {
    tariffs: OrderedCollection<TariffDefinition>,
}

impl TariffCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from definitions, validating each one.
    ///
    /// # Errors
    ///
    /// Returns the first `InvalidTariff` or `DuplicateTariff` encountered.
    pub fn from_tariffs<I>(tariffs: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = TariffDefinition>,
    {
        let mut catalog = Self::new();
        for tariff in tariffs {
            catalog.add(tariff)?;
        }
        Ok(catalog)
    }

    /// Adds a tariff after validating it.
    ///
    /// # Errors
    ///
    /// - `InvalidTariff` if the rate steps break the rules for its kind
    /// - `DuplicateTariff` if the id is already taken
    pub fn add(&mut self, tariff: TariffDefinition) -> EngineResult<()> {
        tariff.validate()?;
        if self.contains(&tariff.id) {
            return Err(EngineError::DuplicateTariff {
                tariff_id: tariff.id,
            });
        }
        debug!(tariff_id = %tariff.id, kind = tariff.kind.as_str(), "Tariff added to catalog");
        self.tariffs.add(tariff);
        Ok(())
    }

    /// Adds a tariff under the next free generated id and returns that id.
    ///
    /// Ids are `T` followed by the catalog size plus one, zero padded to three
    /// digits (`T001`, `T002`, ...); taken ids are skipped.
    pub fn add_with_generated_id(
        &mut self,
        name: impl Into<String>,
        kind: TariffKind,
        valid_from: NaiveDate,
        valid_to: NaiveDate,
        rate_steps: Vec<RateStep>,
    ) -> EngineResult<String> {
        let id = self.next_id();
        self.add(TariffDefinition {
            id: id.clone(),
            name: name.into(),
            kind,
            valid_from,
            valid_to,
            rate_steps,
        })?;
        Ok(id)
    }

    /// Returns the id the next generated tariff would get.
    pub fn next_id(&self) -> String {
        let mut number = self.tariffs.len() + 1;
        loop {
            let id = format!("T{:03}", number);
            if !self.contains(&id) {
                return id;
            }
            number += 1;
        }
    }

    /// Returns the tariff with the given id.
    pub fn get(&self, id: &str) -> Option<&TariffDefinition> {
        self.tariffs.iter().find(|t| t.id == id)
    }

    /// Returns the tariff with the given id or a `TariffNotFound` error.
    pub fn require(&self, id: &str) -> EngineResult<&TariffDefinition> {
        self.get(id).ok_or_else(|| EngineError::TariffNotFound {
            tariff_id: id.to_string(),
        })
    }

    /// Returns true if a tariff with the given id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Replaces a tariff through `update`, re-validating the result.
    ///
    /// The id may not be changed to one that is already taken. On error the
    /// stored tariff is left unchanged.
    pub fn update<F>(&mut self, id: &str, update: F) -> EngineResult<()>
    where
        F: FnOnce(&mut TariffDefinition),
    {
        let index = self.index_of(id)?;
        let taken: Vec<String> = self
            .tariffs
            .iter()
            .filter(|t| t.id != id)
            .map(|t| t.id.clone())
            .collect();

        self.tariffs.update_at(index, |tariff| {
            update(tariff);
            tariff.validate()?;
            if taken.contains(&tariff.id) {
                return Err(EngineError::DuplicateTariff {
                    tariff_id: tariff.id.clone(),
                });
            }
            Ok(())
        })
    }

    /// Removes and returns the tariff with the given id.
    pub fn remove(&mut self, id: &str) -> EngineResult<TariffDefinition> {
        let index = self.index_of(id)?;
        self.tariffs.remove_at(index)
    }

    /// Moves a tariff from one catalog position to another.
    pub fn move_tariff(&mut self, from: usize, to: usize) -> EngineResult<()> {
        self.tariffs.move_at(from, to)
    }

    /// Iterates over all tariffs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &TariffDefinition> {
        self.tariffs.iter()
    }

    /// Returns the tariffs that apply on the given date.
    pub fn active_on(&self, date: NaiveDate) -> Vec<&TariffDefinition> {
        self.tariffs.iter().filter(|t| t.is_active_on(date)).collect()
    }

    /// Returns the number of tariffs.
    pub fn len(&self) -> usize {
        self.tariffs.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.tariffs.is_empty()
    }

    /// Resolves selected ids in order; unknown ids are skipped.
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> TariffSelection<'_> {
        let mut tariffs = Vec::with_capacity(ids.len());
        let mut skipped = Vec::new();

        for id in ids {
            let id = id.as_ref();
            match self.get(id) {
                Some(tariff) => tariffs.push(tariff),
                None => {
                    debug!(tariff_id = %id, "Skipping unknown tariff");
                    skipped.push(id.to_string());
                }
            }
        }

        TariffSelection { tariffs, skipped }
    }

    /// Resolves selected ids, keeping only tariffs that apply on `date`.
    ///
    /// Ids that are unknown or not valid on `date` are both reported as
    /// skipped.
    pub fn select_active<S: AsRef<str>>(&self, ids: &[S], date: NaiveDate) -> TariffSelection<'_> {
        let TariffSelection { tariffs, mut skipped } = self.select(ids);
        let mut active = Vec::with_capacity(tariffs.len());

        for tariff in tariffs {
            if tariff.is_active_on(date) {
                active.push(tariff);
            } else {
                debug!(tariff_id = %tariff.id, date = %date, "Skipping tariff outside validity period");
                skipped.push(tariff.id.clone());
            }
        }

        TariffSelection {
            tariffs: active,
            skipped,
        }
    }

    /// Prices a quantity under the selected tariff ids.
    pub fn calculate<S: AsRef<str>>(&self, consumption_quantity: Decimal, ids: &[S]) -> CatalogCalculation {
        let selection = self.select(ids);
        CatalogCalculation {
            result: calculate_price(consumption_quantity, selection.tariffs),
            skipped: selection.skipped,
        }
    }

    fn index_of(&self, id: &str) -> EngineResult<usize> {
        self.tariffs
            .position(|t| t.id == id)
            .ok_or_else(|| EngineError::TariffNotFound {
                tariff_id: id.to_string(),
            })
    }
}
