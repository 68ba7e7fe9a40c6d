//! Configuration types for the tariff engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::TariffCatalog;

/// Metadata about the tariff catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMetadata {
    /// Short code of the catalog (e.g., "ISU_BASIC").
    pub code: String,
    /// The human-readable name of the catalog.
    pub name: String,
    /// The version or effective date of the catalog.
    pub version: String,
    /// ISO currency code the rates are expressed in.
    pub currency: String,
}

/// Billing defaults from billing.yaml.
///
/// The base price is stored per month; a billing run charges it once per
/// billed month and credits the installments already paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Number of months in a billing period.
    pub billing_months: u32,
    /// Amount of one monthly installment.
    pub installment_amount: Decimal,
    /// Number of installments paid during the billing period.
    pub installments_paid: u32,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            billing_months: 12,
            installment_amount: Decimal::ZERO,
            installments_paid: 0,
        }
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: CatalogMetadata,
    catalog: TariffCatalog,
    billing: BillingConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(metadata: CatalogMetadata, catalog: TariffCatalog, billing: BillingConfig) -> Self {
        Self {
            metadata,
            catalog,
            billing,
        }
    }

    /// Returns the catalog metadata.
    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    /// Returns the tariff catalog.
    pub fn catalog(&self) -> &TariffCatalog {
        &self.catalog
    }

    /// Returns the billing defaults.
    pub fn billing(&self) -> &BillingConfig {
        &self.billing
    }
}
