//! Geocoding port
//!
//! Defines the interface for resolving a city name to candidate coordinates.

use async_trait::async_trait;
use domain::value_objects::{CityName, GeoPosition};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// A single geocoding match returned by the upstream
#[derive(Debug, Clone, PartialEq)]
pub struct GeoCandidate {
    /// Place name as canonicalized by the upstream
    pub name: String,
    /// Coordinates of the match
    pub position: GeoPosition,
}

/// Port for geocoding operations
///
/// One call maps to one upstream geocoding request. Candidate order is the
/// upstream's relevance order; callers that want a single answer take the
/// first entry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Search for coordinate candidates matching a city name
    ///
    /// Returns an empty vector when the upstream knows no such place; that
    /// is a valid answer, not an error.
    async fn search(&self, city: &CityName) -> Result<Vec<GeoCandidate>, ApplicationError>;
}
