//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// The lookup flow distinguishes three outcomes: invalid input surfaces as
/// [`ApplicationError::Domain`], an unknown city is `Ok(None)` from the
/// lookup service (not an error), and every network, timeout, credential,
/// cache-backend, or malformed-payload problem talking to a collaborator is
/// [`ApplicationError::Upstream`].
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (invalid caller input)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Failure talking to an upstream collaborator (geocoding, weather,
    /// secret store, or cache backend)
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// Requested item does not exist in a backing store
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable by a boundary retry policy
    ///
    /// The core never retries; this only classifies for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApplicationError::Upstream(_))
    }
}
