//! Configuration loading and management for the Tariff Engine.
//!
//! This module loads the tariff catalog, its metadata and the billing
//! defaults from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use tariff_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/isu_basic").unwrap();
//! println!("Loaded catalog: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BillingConfig, CatalogMetadata, EngineConfig};
