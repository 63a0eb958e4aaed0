//! Weather port
//!
//! Defines the interface for fetching normalized current conditions for a
//! coordinate pair.

use async_trait::async_trait;
use domain::value_objects::{CardinalDirection, GeoPosition};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Current conditions normalized from one upstream weather response
///
/// Implementations parse the upstream payload defensively: optional blocks
/// that are absent leave the corresponding fields at their zero/empty
/// defaults rather than failing the call.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in the configured unit system
    pub temperature: f64,
    /// Condition group, e.g. "Clouds"; empty when the upstream omits it
    pub condition: String,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in the configured unit system
    pub wind_speed: f64,
    /// Wind direction mapped to the eight-point compass
    pub wind_direction: CardinalDirection,
}

/// Port for current-weather retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Fetch current conditions for a position
    ///
    /// One call maps to one upstream request, bounded by the configured
    /// timeout. Any transport, credential, or payload failure is an
    /// [`ApplicationError::Upstream`].
    async fn current(&self, position: &GeoPosition) -> Result<CurrentConditions, ApplicationError>;
}
