//! Environment-based secret store adapter
//!
//! Reads secrets from environment variables. Useful for local development
//! and containerized deployments where secrets are injected via environment.

use application::{error::ApplicationError, ports::SecretStorePort};
use async_trait::async_trait;
use std::env;
use tracing::{debug, instrument, warn};

/// Secret store that reads from environment variables
///
/// Keys are transformed to uppercase with slashes and hyphens replaced by
/// underscores. For example: "skycast/openweather" becomes
/// "SKYCAST_OPENWEATHER"
#[derive(Debug, Clone, Default)]
pub struct EnvSecretStore {
    /// Optional prefix for all environment variable lookups
    prefix: Option<String>,
}

impl EnvSecretStore {
    /// Create a new environment secret store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a prefix for all environment variable lookups
    ///
    /// # Example
    /// ```
    /// use infrastructure::adapters::EnvSecretStore;
    ///
    /// let store = EnvSecretStore::with_prefix("SKYCAST");
    /// // Looking up "openweather" will check "SKYCAST_OPENWEATHER"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Transform a key path to an environment variable name
    fn key_to_env_var(&self, key: &str) -> String {
        let normalized = key.replace(['/', '-'], "_").to_uppercase();

        match &self.prefix {
            Some(prefix) => format!("{prefix}_{normalized}"),
            None => normalized,
        }
    }
}

#[async_trait]
impl SecretStorePort for EnvSecretStore {
    #[instrument(skip(self), fields(env_var))]
    async fn get_secret(&self, key: &str) -> Result<String, ApplicationError> {
        let env_var = self.key_to_env_var(key);
        tracing::Span::current().record("env_var", &env_var);

        match env::var(&env_var) {
            Ok(value) => {
                debug!("Retrieved secret from environment variable");
                Ok(value)
            },
            Err(env::VarError::NotPresent) => {
                warn!(env_var = %env_var, "Secret not found in environment");
                Err(ApplicationError::NotFound(format!(
                    "Secret not found: {key} (env: {env_var})"
                )))
            },
            Err(env::VarError::NotUnicode(_)) => Err(ApplicationError::Configuration(format!(
                "Secret contains invalid UTF-8: {env_var}"
            ))),
        }
    }

    #[instrument(skip(self))]
    async fn get_json(&self, path: &str) -> Result<serde_json::Value, ApplicationError> {
        let value = self.get_secret(path).await?;
        serde_json::from_str(&value).map_err(|e| {
            ApplicationError::Configuration(format!("Failed to parse secret as JSON: {e}"))
        })
    }

    async fn is_healthy(&self) -> bool {
        // Environment variables are always accessible
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_transformation_simple() {
        let store = EnvSecretStore::new();
        assert_eq!(store.key_to_env_var("api_key"), "API_KEY");
    }

    #[test]
    fn key_transformation_with_slashes() {
        let store = EnvSecretStore::new();
        assert_eq!(
            store.key_to_env_var("skycast/openweather"),
            "SKYCAST_OPENWEATHER"
        );
    }

    #[test]
    fn key_transformation_with_hyphens() {
        let store = EnvSecretStore::new();
        assert_eq!(store.key_to_env_var("weather-api-key"), "WEATHER_API_KEY");
    }

    #[test]
    fn key_transformation_with_prefix() {
        let store = EnvSecretStore::with_prefix("SKYCAST");
        assert_eq!(
            store.key_to_env_var("openweather/credentials"),
            "SKYCAST_OPENWEATHER_CREDENTIALS"
        );
    }

    #[tokio::test]
    async fn get_secret_from_existing_env() {
        // Use PATH which is guaranteed to exist on all systems
        let store = EnvSecretStore::new();
        let result = store.get_secret("path").await;

        assert!(result.is_ok());
        assert!(!result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_secret_not_found() {
        let store = EnvSecretStore::new();
        let result = store.get_secret("definitely/not/exists/xyz789").await;

        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }

    #[tokio::test]
    async fn get_json_rejects_non_json_value() {
        let store = EnvSecretStore::new();

        // PATH is not valid JSON, so this must fail with a parse error
        let result = store.get_json("path").await;
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[tokio::test]
    async fn is_healthy_always_true() {
        let store = EnvSecretStore::new();
        assert!(store.is_healthy().await);
    }
}
