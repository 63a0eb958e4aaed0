//! Adapters implementing application ports

mod env_secret_store;
mod openweather_adapter;
mod vault_secret_store;

pub use env_secret_store::EnvSecretStore;
pub use openweather_adapter::OpenWeatherAdapter;
pub use vault_secret_store::{ChainedSecretStore, VaultSecretStore};
