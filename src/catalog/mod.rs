//! The tariff catalog and the ordered collection backing it.

mod collection;
mod tariff_catalog;

pub use collection::OrderedCollection;
pub use tariff_catalog::{CatalogCalculation, TariffCatalog, TariffSelection};
