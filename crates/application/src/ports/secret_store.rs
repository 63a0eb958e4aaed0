//! Port for secret storage and retrieval
//!
//! This port defines the interface for securely retrieving secrets from
//! various backends (environment variables, HashiCorp Vault, etc.). The
//! lookup flow only needs one secret: the JSON document holding the weather
//! API credential.

use async_trait::async_trait;

use crate::error::ApplicationError;

/// Port for secret storage operations
///
/// Implementations can retrieve secrets from various backends:
/// - Environment variables (for local development)
/// - HashiCorp Vault (for production)
///
/// The trait is object-safe to allow dynamic dispatch and chaining.
#[async_trait]
pub trait SecretStorePort: Send + Sync {
    /// Retrieve a secret by its key/path
    ///
    /// # Arguments
    /// * `key` - The key or path to the secret (e.g. "skycast/openweather")
    ///
    /// # Returns
    /// The secret value as a string. Absence is
    /// [`ApplicationError::NotFound`], which chained stores use to fall
    /// through to the next backend.
    async fn get_secret(&self, key: &str) -> Result<String, ApplicationError>;

    /// Retrieve a structured secret as a JSON value
    ///
    /// The weather credential lives in a JSON document of the shape
    /// `{"weather-api-key": "..."}`.
    async fn get_json(&self, path: &str) -> Result<serde_json::Value, ApplicationError>;

    /// Check if the secret store is healthy and accessible
    async fn is_healthy(&self) -> bool;
}
