//! Chart configuration loading from config.toml
//!
//! Every section is optional. Missing values fall back to the built-in
//! geometry, default policy and settle delay; a missing `[[sectors]]` list
//! means the chart starts with the default three-sector seed.

use crate::{
    core::{defaults::DefaultPolicy, geometry::ChartGeometry},
    entities::NewSector,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::{path::Path, time::Duration};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Delay before a lone 100% sector settles at exactly 100, in ms
    pub settle_delay_ms: u64,
    /// Center and radius of the drawn chart
    pub chart: ChartGeometry,
    /// Placeholder name prefix and fallback color
    pub defaults: DefaultPolicy,
    /// Initial sectors, in drawing order
    pub sectors: Option<Vec<NewSector>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 10,
            chart: ChartGeometry::default(),
            defaults: DefaultPolicy::default(),
            sectors: None,
        }
    }
}

impl AppConfig {
    /// Settle delay as a `Duration`.
    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Loads chart configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads configuration from the location named by the environment, or
/// built-in defaults when that file does not exist.
pub fn load_default_config() -> Result<AppConfig> {
    let path = super::env::get_config_path();
    if Path::new(&path).exists() {
        load_config(&path)
    } else {
        tracing::info!("No configuration at {path}, using defaults");
        Ok(AppConfig::default())
    }
}
