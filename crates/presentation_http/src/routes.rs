//! Route definitions

use axum::{Router, http::HeaderValue, routing::get};
use tower_http::cors::{Any, CorsLayer};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Weather API (v1)
        .route("/v1/weather", get(handlers::weather::current_weather))
        // Attach state
        .with_state(state)
}

/// Build the CORS layer from the configured origins
///
/// An empty list allows any origin, matching the original deployment's
/// `Access-Control-Allow-Origin: *` behavior; a non-empty list restricts to
/// exactly those origins.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
