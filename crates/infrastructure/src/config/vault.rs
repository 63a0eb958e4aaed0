//! HashiCorp Vault configuration.

use serde::{Deserialize, Serialize};

/// Vault secret store settings as they appear in the application config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultAppConfig {
    /// Whether to use Vault at all; when false, secrets come from the
    /// environment store only
    #[serde(default)]
    pub enabled: bool,

    /// Vault server address
    #[serde(default = "default_address")]
    pub address: String,

    /// Authentication token
    #[serde(default)]
    pub token: Option<String>,

    /// KV v2 mount path
    #[serde(default = "default_mount_path")]
    pub mount_path: String,
}

fn default_address() -> String {
    "http://127.0.0.1:8200".to_string()
}

fn default_mount_path() -> String {
    "secret".to_string()
}

impl Default for VaultAppConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            address: default_address(),
            token: None,
            mount_path: default_mount_path(),
        }
    }
}

impl VaultAppConfig {
    /// Build the connection settings for the Vault client
    #[must_use]
    pub fn connection(&self) -> VaultConfig {
        VaultConfig {
            address: self.address.clone(),
            token: self.token.clone(),
            mount_path: self.mount_path.clone(),
        }
    }
}

/// Connection settings consumed by `VaultSecretStore`
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Vault server address (e.g. "https://vault.example.com:8200")
    pub address: String,
    /// Authentication token
    pub token: Option<String>,
    /// KV v2 mount path (default: "secret")
    pub mount_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_by_default() {
        let config = VaultAppConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.address, "http://127.0.0.1:8200");
        assert_eq!(config.mount_path, "secret");
        assert!(config.token.is_none());
    }

    #[test]
    fn connection_carries_settings() {
        let config = VaultAppConfig {
            enabled: true,
            address: "https://vault.example.com:8200".to_string(),
            token: Some("s.token".to_string()),
            mount_path: "kv".to_string(),
        };
        let connection = config.connection();
        assert_eq!(connection.address, "https://vault.example.com:8200");
        assert_eq!(connection.token.as_deref(), Some("s.token"));
        assert_eq!(connection.mount_path, "kv");
    }
}
