//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: the in-memory
//! caches, the secret store backends, and the OpenWeatherMap-backed
//! geocoding and weather adapters. Also owns application configuration.

pub mod adapters;
pub mod cache;
pub mod config;

pub use adapters::{ChainedSecretStore, EnvSecretStore, OpenWeatherAdapter, VaultSecretStore};
pub use cache::{MokaCache, MokaCacheConfig};
pub use config::{
    AppConfig, CacheConfig, Environment, OpenWeatherAppConfig, ServerConfig, VaultAppConfig,
    VaultConfig,
};
