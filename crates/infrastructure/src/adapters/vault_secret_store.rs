//! HashiCorp Vault secret store adapter
//!
//! Retrieves secrets from HashiCorp Vault using the KV v2 secrets engine
//! with token-based authentication.

use std::sync::Arc;

use application::{error::ApplicationError, ports::SecretStorePort};
use async_trait::async_trait;
use tracing::{debug, error, info, instrument, warn};
use vaultrs::{
    client::{VaultClient, VaultClientSettingsBuilder},
    kv2,
};

use crate::config::VaultConfig;

/// Secret store that reads from HashiCorp Vault
pub struct VaultSecretStore {
    client: VaultClient,
    mount_path: String,
}

impl std::fmt::Debug for VaultSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSecretStore")
            .field("mount_path", &self.mount_path)
            .field("client", &"VaultClient { ... }")
            .finish()
    }
}

impl VaultSecretStore {
    /// Create a new Vault secret store with the given configuration
    ///
    /// # Errors
    /// Returns an error if the Vault client cannot be created
    pub fn new(config: &VaultConfig) -> Result<Self, ApplicationError> {
        let mut settings_builder = VaultClientSettingsBuilder::default();
        settings_builder.address(&config.address);

        if let Some(token) = &config.token {
            settings_builder.token(token);
        }

        let settings = settings_builder
            .build()
            .map_err(|e| ApplicationError::Configuration(format!("Invalid Vault config: {e}")))?;

        let client = VaultClient::new(settings).map_err(|e| {
            ApplicationError::Upstream(format!("Failed to create Vault client: {e}"))
        })?;

        info!(address = %config.address, "Connected to Vault");

        Ok(Self {
            client,
            mount_path: config.mount_path.clone(),
        })
    }

    /// Parse a path to extract mount and secret path
    ///
    /// Supports formats:
    /// - "skycast/openweather" -> uses default mount, path as-is
    /// - "secret/data/skycast/openweather" -> mount = "secret", path = "skycast/openweather"
    fn parse_path(&self, path: &str) -> (String, String) {
        let data_prefix = format!("{}/data/", self.mount_path);
        if let Some(stripped) = path.strip_prefix(&data_prefix) {
            return (self.mount_path.clone(), stripped.to_string());
        }

        let mount_prefix = format!("{}/", self.mount_path);
        if let Some(stripped) = path.strip_prefix(&mount_prefix) {
            return (self.mount_path.clone(), stripped.to_string());
        }

        (self.mount_path.clone(), path.to_string())
    }
}

#[async_trait]
impl SecretStorePort for VaultSecretStore {
    #[instrument(skip(self))]
    async fn get_secret(&self, key: &str) -> Result<String, ApplicationError> {
        let (mount, path) = self.parse_path(key);

        debug!(mount = %mount, path = %path, "Fetching secret from Vault");

        let secret: std::collections::HashMap<String, String> =
            kv2::read(&self.client, &mount, &path).await.map_err(|e| {
                if e.to_string().contains("404") || e.to_string().contains("not found") {
                    ApplicationError::NotFound(format!("Secret not found: {key}"))
                } else {
                    error!(error = %e, "Failed to read secret from Vault");
                    ApplicationError::Upstream(format!("Vault read failed: {e}"))
                }
            })?;

        secret
            .get("value")
            .or_else(|| secret.values().next())
            .cloned()
            .ok_or_else(|| ApplicationError::NotFound(format!("Secret has no value field: {key}")))
    }

    #[instrument(skip(self))]
    async fn get_json(&self, path: &str) -> Result<serde_json::Value, ApplicationError> {
        let (mount, secret_path) = self.parse_path(path);

        debug!(mount = %mount, path = %secret_path, "Fetching JSON secret from Vault");

        kv2::read(&self.client, &mount, &secret_path)
            .await
            .map_err(|e| {
                if e.to_string().contains("404") || e.to_string().contains("not found") {
                    ApplicationError::NotFound(format!("Secret not found: {path}"))
                } else {
                    error!(error = %e, "Failed to read secret from Vault");
                    ApplicationError::Upstream(format!("Vault read failed: {e}"))
                }
            })
    }

    async fn is_healthy(&self) -> bool {
        match vaultrs::sys::health(&self.client).await {
            Ok(health) => {
                if health.sealed {
                    warn!("Vault is sealed");
                    false
                } else {
                    true
                }
            },
            Err(e) => {
                error!(error = %e, "Vault health check failed");
                false
            },
        }
    }
}

/// Combined secret store that tries multiple backends
///
/// First tries Vault, then falls back to environment variables. Useful for
/// development where Vault may not be available; the lookup orchestration
/// stays identical regardless of which backend answers.
pub struct ChainedSecretStore {
    stores: Vec<Arc<dyn SecretStorePort>>,
}

impl std::fmt::Debug for ChainedSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainedSecretStore")
            .field("stores_count", &self.stores.len())
            .finish()
    }
}

impl ChainedSecretStore {
    /// Create a new chained secret store with the given backends
    pub fn new(stores: Vec<Arc<dyn SecretStorePort>>) -> Self {
        Self { stores }
    }
}

#[async_trait]
impl SecretStorePort for ChainedSecretStore {
    async fn get_secret(&self, key: &str) -> Result<String, ApplicationError> {
        let mut last_error = None;

        for store in &self.stores {
            match store.get_secret(key).await {
                Ok(value) => return Ok(value),
                Err(ApplicationError::NotFound(_)) => {},
                Err(e) => {
                    last_error = Some(e);
                },
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ApplicationError::NotFound(format!("Secret not found in any store: {key}"))
        }))
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, ApplicationError> {
        let mut last_error = None;

        for store in &self.stores {
            match store.get_json(path).await {
                Ok(value) => return Ok(value),
                Err(ApplicationError::NotFound(_)) => {},
                Err(e) => {
                    last_error = Some(e);
                },
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ApplicationError::NotFound(format!("Secret not found in any store: {path}"))
        }))
    }

    async fn is_healthy(&self) -> bool {
        // Healthy if at least one store is healthy
        for store in &self.stores {
            if store.is_healthy().await {
                return true;
            }
        }
        false
    }
}
