//! SkyCast HTTP presentation layer
//!
//! This crate provides the HTTP API for SkyCast: the weather lookup
//! endpoint, health probes, and the error-to-status translation.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, set_expose_internal_errors};
pub use routes::{cors_layer, create_router};
pub use state::AppState;
