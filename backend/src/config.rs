//! Configuration management for the Merchandising Analytics Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with MDA_ prefix

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Warehouse connection configuration
    pub warehouse: WarehouseConfig,

    /// Default analysis parameters
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WarehouseConfig {
    /// Warehouse connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

/// Defaults for the classification knobs; every request may override
/// them via query parameters
#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// Stagnation threshold as a UI percentage (0.01 = 0.01%)
    pub threshold_pct: Decimal,

    /// Prior-month quantity floor for the stagnation check
    pub min_qty: i64,

    /// Current-month style quantity floor for the override bucket
    pub current_month_min_qty: i64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("MDA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("warehouse.max_connections", 10)?
            .set_default("warehouse.min_connections", 2)?
            .set_default("analysis.threshold_pct", "0.01")?
            .set_default("analysis.min_qty", 10)?
            .set_default("analysis.current_month_min_qty", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (MDA_ prefix)
            .add_source(
                Environment::with_prefix("MDA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
