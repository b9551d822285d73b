//! Configuration management for chart geometry, defaults and seed sectors.

/// Chart configuration loading from config.toml
pub mod chart;

/// Environment lookups for configuration locations
pub mod env;

pub use chart::{AppConfig, load_config};
