//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `server`: HTTP server settings
//! - `upstream`: OpenWeatherMap client and credential settings
//! - `vault`: HashiCorp Vault secret store settings
//! - `cache`: cache capacity and TTL settings

mod cache;
mod server;
mod upstream;
mod vault;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use cache::CacheConfig;
pub use server::ServerConfig;
pub use upstream::OpenWeatherAppConfig;
pub use vault::{VaultAppConfig, VaultConfig};

/// Application environment (development or production)
///
/// Controls how much error detail the boundary exposes to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - full error details in responses
    #[default]
    Development,
    /// Production environment - generic error messages only
    Production,
}

impl Environment {
    /// Whether this environment is production
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// OpenWeatherMap upstream configuration
    #[serde(default)]
    pub openweather: OpenWeatherAppConfig,

    /// Vault secret store configuration
    #[serde(default)]
    pub vault: VaultAppConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// Reads an optional `config.toml` from the working directory, then
    /// applies `SKYCAST_*` environment overrides (e.g. `SKYCAST_SERVER_PORT`).
    ///
    /// # Errors
    ///
    /// Returns an error when a source is malformed or a field fails to parse.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("SKYCAST")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
