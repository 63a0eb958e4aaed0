//! Application state shared across handlers

use std::sync::Arc;

use application::{WeatherLookupService, ports::SecretStorePort};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Weather lookup orchestrator
    pub lookup_service: Arc<WeatherLookupService>,
    /// Secret store, consulted by the readiness probe
    pub secret_store: Arc<dyn SecretStorePort>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
