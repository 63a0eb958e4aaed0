//! Normalized current-weather snapshot

use serde::{Deserialize, Serialize};

use crate::value_objects::CardinalDirection;

/// Normalized current conditions for one city
///
/// Derived entirely from a single upstream weather response and immutable
/// once constructed. The `city` field carries the caller's requested name,
/// not the upstream's canonicalized one. Serializes to the outbound wire
/// shape: `{city, temperature, weatherCondition{type, pressure, humidity},
/// wind{speed, direction}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// City name as requested by the caller
    pub city: String,
    /// Temperature in the configured unit system
    pub temperature: f64,
    /// Sky condition and atmospheric readings
    #[serde(rename = "weatherCondition")]
    pub condition: WeatherCondition,
    /// Wind speed and direction
    pub wind: Wind,
}

/// Sky condition and atmospheric readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    /// Condition group reported by the upstream, e.g. "Clouds" or "Rain";
    /// empty when the upstream omits the conditions block
    #[serde(rename = "type")]
    pub kind: String,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Relative humidity in percent
    pub humidity: f64,
}

/// Wind reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Wind speed in the configured unit system
    pub speed: f64,
    /// Compass direction the wind blows from
    pub direction: CardinalDirection,
}

impl WeatherSnapshot {
    /// Assemble a snapshot for the given city
    #[must_use]
    pub fn new(
        city: impl Into<String>,
        temperature: f64,
        condition: WeatherCondition,
        wind: Wind,
    ) -> Self {
        Self {
            city: city.into(),
            temperature,
            condition,
            wind,
        }
    }
}
