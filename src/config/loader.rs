//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the tariff
//! catalog and billing defaults from YAML files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::catalog::TariffCatalog;
use crate::error::{EngineError, EngineResult};
use crate::models::TariffDefinition;

use super::types::{BillingConfig, CatalogMetadata, EngineConfig};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/isu_basic/
/// ├── catalog.yaml     # Catalog metadata
/// ├── billing.yaml     # Billing defaults
/// └── tariffs/
///     ├── t001_energy_basic.yaml
///     └── ...          # One tariff definition per file
/// ```
///
/// Tariff files are read in file name order, which is the catalog order.
///
/// # Example
///
/// ```no_run
/// use tariff_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/isu_basic").unwrap();
/// let tariff = loader.get_tariff("T001").unwrap();
/// println!("{}: {:?}", tariff.name, tariff.kind);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if a required file or the tariffs directory is
    ///   missing, or the directory has no tariff files
    /// - `ConfigParseError` if a file is not valid YAML for its type, a tariff
    ///   breaks the rate step rules, or two files share a tariff id
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<CatalogMetadata>(&path.join("catalog.yaml"))?;
        let billing = Self::load_yaml::<BillingConfig>(&path.join("billing.yaml"))?;
        let catalog = Self::load_tariffs(&path.join("tariffs"))?;

        info!(
            catalog = %metadata.code,
            version = %metadata.version,
            tariffs = catalog.len(),
            "Loaded tariff configuration"
        );

        Ok(Self {
            config: EngineConfig::new(metadata, catalog, billing),
        })
    }

    /// Creates a loader around an already built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all tariff files from the tariffs directory into a catalog.
    fn load_tariffs(tariffs_dir: &Path) -> EngineResult<TariffCatalog> {
        let dir_str = tariffs_dir.display().to_string();

        let entries = fs::read_dir(tariffs_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no tariff files found)", dir_str),
            });
        }
        paths.sort();

        let mut catalog = TariffCatalog::new();
        for path in paths {
            let tariff = Self::load_yaml::<TariffDefinition>(&path)?;
            catalog
                .add(tariff)
                .map_err(|e| EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(catalog)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the catalog metadata.
    pub fn metadata(&self) -> &CatalogMetadata {
        self.config.metadata()
    }

    /// Returns the tariff catalog.
    pub fn catalog(&self) -> &TariffCatalog {
        self.config.catalog()
    }

    /// Returns the billing defaults.
    pub fn billing(&self) -> &BillingConfig {
        self.config.billing()
    }

    /// Gets a tariff by its id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tariff_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/isu_basic")?;
    /// let tariff = loader.get_tariff("T003")?;
    /// println!("{} has {} bands", tariff.name, tariff.rate_steps.len());
    /// # Ok::<(), tariff_engine::error::EngineError>(())
    /// ```
    pub fn get_tariff(&self, id: &str) -> EngineResult<&TariffDefinition> {
        self.config.catalog().require(id)
    }
}
