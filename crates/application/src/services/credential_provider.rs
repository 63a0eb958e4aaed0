//! Weather API credential provider
//!
//! Holds the upstream API credential for the process lifetime: fetched
//! lazily from the secret store on first use, shared lock-free with
//! concurrent lookups, and re-fetched after an authentication failure.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::SecretString;
use tracing::{debug, instrument, warn};

use crate::{error::ApplicationError, ports::SecretStorePort};

/// Field of the secret document that carries the API key by convention
pub const DEFAULT_CREDENTIAL_FIELD: &str = "weather-api-key";

/// Lazily-initialized, refreshable API credential
///
/// Readers never block: the cached credential is swapped atomically, so a
/// rotation or [`invalidate`](Self::invalidate) does not pause in-flight
/// lookups. A reader holding a stale credential simply fails upstream and
/// the next call re-fetches. Concurrent first-use fetches are tolerated;
/// the fetch is idempotent and cheap.
pub struct CredentialProvider {
    store: Arc<dyn SecretStorePort>,
    secret_path: String,
    field: String,
    cached: ArcSwapOption<SecretString>,
}

impl std::fmt::Debug for CredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialProvider")
            .field("secret_path", &self.secret_path)
            .field("field", &self.field)
            .field("cached", &self.cached.load().is_some())
            .finish_non_exhaustive()
    }
}

impl CredentialProvider {
    /// Create a provider reading `field` from the JSON document at
    /// `secret_path`
    pub fn new(
        store: Arc<dyn SecretStorePort>,
        secret_path: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            store,
            secret_path: secret_path.into(),
            field: field.into(),
            cached: ArcSwapOption::empty(),
        }
    }

    /// Create a provider using the conventional `weather-api-key` field
    pub fn with_default_field(
        store: Arc<dyn SecretStorePort>,
        secret_path: impl Into<String>,
    ) -> Self {
        Self::new(store, secret_path, DEFAULT_CREDENTIAL_FIELD)
    }

    /// Get the credential, fetching from the secret store on first use
    ///
    /// From the lookup flow's viewpoint the credential is a prerequisite of
    /// the upstream call, so any secret-store failure (including an absent
    /// document or field) surfaces as [`ApplicationError::Upstream`].
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<Arc<SecretString>, ApplicationError> {
        if let Some(credential) = self.cached.load_full() {
            return Ok(credential);
        }

        debug!(path = %self.secret_path, "Fetching weather API credential");
        let document = self.store.get_json(&self.secret_path).await.map_err(|e| {
            warn!(error = %e, "Credential fetch failed");
            ApplicationError::Upstream(format!("credential unavailable: {e}"))
        })?;

        let value = document
            .get(&self.field)
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| {
                ApplicationError::Upstream(format!(
                    "secret document has no '{}' field",
                    self.field
                ))
            })?;

        let credential = Arc::new(SecretString::from(value.to_string()));
        self.cached.store(Some(Arc::clone(&credential)));
        Ok(credential)
    }

    /// Drop the cached credential so the next [`get`](Self::get) re-fetches
    ///
    /// Called by adapters after the upstream rejects the credential
    /// (secret rotation).
    pub fn invalidate(&self) {
        debug!("Invalidating cached weather API credential");
        self.cached.store(None);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use secrecy::ExposeSecret;

    use super::*;

    /// Secret store that counts fetches and serves one fixed document
    #[derive(Debug)]
    struct CountingStore {
        document: Option<String>,
        fetches: AtomicUsize,
    }

    impl CountingStore {
        fn with_document(document: &str) -> Self {
            Self {
                document: Some(document.to_string()),
                fetches: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                document: None,
                fetches: AtomicUsize::new(0),
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SecretStorePort for CountingStore {
        async fn get_secret(&self, key: &str) -> Result<String, ApplicationError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.document
                .clone()
                .ok_or_else(|| ApplicationError::NotFound(format!("Secret not found: {key}")))
        }

        async fn get_json(&self, path: &str) -> Result<serde_json::Value, ApplicationError> {
            let value = self.get_secret(path).await?;
            serde_json::from_str(&value).map_err(|e| {
                ApplicationError::Configuration(format!("Failed to parse secret: {e}"))
            })
        }

        async fn is_healthy(&self) -> bool {
            self.document.is_some()
        }
    }

    #[tokio::test]
    async fn fetches_once_and_caches() {
        let store = Arc::new(CountingStore::with_document(
            r#"{"weather-api-key": "abc123"}"#,
        ));
        let provider = CredentialProvider::with_default_field(
            Arc::clone(&store) as Arc<dyn SecretStorePort>,
            "skycast/openweather",
        );

        let first = provider.get().await.unwrap();
        let second = provider.get().await.unwrap();

        assert_eq!(first.expose_secret(), "abc123");
        assert_eq!(second.expose_secret(), "abc123");
        assert_eq!(store.fetch_count(), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let store = Arc::new(CountingStore::with_document(
            r#"{"weather-api-key": "abc123"}"#,
        ));
        let provider = CredentialProvider::with_default_field(
            Arc::clone(&store) as Arc<dyn SecretStorePort>,
            "skycast/openweather",
        );

        provider.get().await.unwrap();
        provider.invalidate();
        provider.get().await.unwrap();

        assert_eq!(store.fetch_count(), 2);
    }

    #[tokio::test]
    async fn missing_field_is_upstream_failure() {
        let store = Arc::new(CountingStore::with_document(r#"{"other-key": "zzz"}"#));
        let provider = CredentialProvider::with_default_field(
            store as Arc<dyn SecretStorePort>,
            "skycast/openweather",
        );

        let result = provider.get().await;
        assert!(matches!(result, Err(ApplicationError::Upstream(_))));
    }

    #[tokio::test]
    async fn store_failure_is_upstream_failure() {
        let store = Arc::new(CountingStore::failing());
        let provider = CredentialProvider::with_default_field(
            store as Arc<dyn SecretStorePort>,
            "skycast/openweather",
        );

        let result = provider.get().await;
        assert!(matches!(result, Err(ApplicationError::Upstream(_))));
    }

    #[tokio::test]
    async fn custom_field_name_is_honored() {
        let store = Arc::new(CountingStore::with_document(r#"{"api-token": "tok"}"#));
        let provider = CredentialProvider::new(
            store as Arc<dyn SecretStorePort>,
            "skycast/openweather",
            "api-token",
        );

        let credential = provider.get().await.unwrap();
        assert_eq!(credential.expose_secret(), "tok");
    }

    #[test]
    fn debug_does_not_leak_credential() {
        let store = Arc::new(CountingStore::with_document(
            r#"{"weather-api-key": "abc123"}"#,
        ));
        let provider = CredentialProvider::with_default_field(
            store as Arc<dyn SecretStorePort>,
            "skycast/openweather",
        );
        let debug = format!("{provider:?}");
        assert!(!debug.contains("abc123"));
        assert!(debug.contains("skycast/openweather"));
    }
}
