//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Reference rate source configuration.
    pub rates: RatesConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Reference rate source configuration.
///
/// When `base_url` is unset the server falls back to the fixed rates below,
/// which is only meant for local development.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Base URL of the reference-rate HTTP endpoint.
    pub base_url: Option<String>,
    /// Fallback USD reference rate (Bs per USD) when no endpoint is set.
    #[serde(default = "default_fallback_usd")]
    pub fallback_usd: Decimal,
    /// Fallback EUR reference rate (Bs per EUR) when no endpoint is set.
    #[serde(default = "default_fallback_eur")]
    pub fallback_eur: Decimal,
}

fn default_fallback_usd() -> Decimal {
    Decimal::new(4000, 2) // 40.00
}

fn default_fallback_eur() -> Decimal {
    Decimal::new(4400, 2) // 44.00
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FIADO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
