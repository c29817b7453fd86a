//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{LedgerConfig, StatutoryScheme};

use super::types::{EngineSettings, LedgerFileConfig, SchemesConfig};

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// provides access to engine settings, statutory schemes per jurisdiction,
/// and the ledger setup.
///
/// # Directory Structure
///
/// ```text
/// config/demo/
/// ├── engine.yaml   # standard hours, overtime multiplier and rules
/// ├── schemes.yaml  # statutory schemes with rate bands
/// └── ledger.yaml   # accounts, segments, mappings, override rules
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/demo").unwrap();
/// let schemes = loader.schemes_for_jurisdiction("ZA");
/// println!("{} schemes configured for ZA", schemes.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: EngineSettings,
    schemes: Vec<StatutoryScheme>,
    ledger: LedgerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// On success the loaded data is normalized: rate bands sorted
    /// ascending by minimum amount, mappings and override rules by
    /// priority descending, segments by segment order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] when a required file is
    /// missing and [`EngineError::ConfigParseError`] when a file contains
    /// invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings: EngineSettings = read_yaml(&path.join("engine.yaml"))?;
        let schemes_config: SchemesConfig = read_yaml(&path.join("schemes.yaml"))?;
        let ledger_config: LedgerFileConfig = read_yaml(&path.join("ledger.yaml"))?;

        let mut schemes = schemes_config.schemes;
        for scheme in &mut schemes {
            scheme.bands.sort_by(|a, b| a.min_amount.cmp(&b.min_amount));
        }
        let mut ledger = ledger_config.ledger;
        ledger.normalize();

        Ok(ConfigLoader {
            settings,
            schemes,
            ledger,
        })
    }

    /// Returns the engine-wide calculation settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the schemes configured for a jurisdiction, in file order.
    ///
    /// An unconfigured jurisdiction legitimately returns an empty list.
    pub fn schemes_for_jurisdiction(&self, jurisdiction: &str) -> Vec<StatutoryScheme> {
        self.schemes
            .iter()
            .filter(|s| s.jurisdiction == jurisdiction)
            .cloned()
            .collect()
    }

    /// Returns the normalized ledger configuration.
    pub fn ledger(&self) -> &LedgerConfig {
        &self.ledger
    }
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
    let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
        path: path.display().to_string(),
    })?;
    serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
