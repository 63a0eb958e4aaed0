//! OpenWeatherMap HTTP client
//!
//! One client instance serves both the geocoding and the current-weather
//! endpoint; every request is bounded by the configured timeout and carries
//! the caller-supplied `appid` credential.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{CurrentObservation, CurrentWeatherResponse, GeocodeEntry};

/// OpenWeatherMap client errors
#[derive(Debug, Error)]
pub enum OpenWeatherError {
    /// Connection to the API failed or timed out
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request reached the API but failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the API response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// The API rejected the credential
    #[error("Credential rejected by upstream")]
    Unauthorized,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Unit system for temperature and wind speed, fixed at deployment time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Celsius and meters per second
    #[default]
    Metric,
    /// Fahrenheit and miles per hour
    Imperial,
}

impl UnitSystem {
    /// Value of the `units` query parameter
    #[must_use]
    pub const fn as_query_value(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query_value())
    }
}

/// OpenWeatherMap client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Unit system for temperature and wind speed (default: metric)
    #[serde(default)]
    pub units: UnitSystem,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            units: UnitSystem::default(),
        }
    }
}

/// HTTP client for the OpenWeatherMap APIs
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, OpenWeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OpenWeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, OpenWeatherError> {
        Self::new(OpenWeatherConfig::default())
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), OpenWeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(OpenWeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Map a transport error to a client error
    fn map_transport(e: &reqwest::Error) -> OpenWeatherError {
        if e.is_timeout() || e.is_connect() {
            OpenWeatherError::ConnectionFailed(e.to_string())
        } else {
            OpenWeatherError::RequestFailed(e.to_string())
        }
    }

    /// Classify a non-success HTTP status
    fn check_status(status: reqwest::StatusCode) -> Result<(), OpenWeatherError> {
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(OpenWeatherError::Unauthorized);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OpenWeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(OpenWeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(OpenWeatherError::RequestFailed(format!("HTTP {status}")));
        }
        Ok(())
    }

    /// Look up coordinate candidates for a city name
    ///
    /// Calls `geo/1.0/direct`; the upstream may return zero or more matches
    /// in its own relevance order. An empty array is a valid answer.
    #[instrument(skip(self, api_key), fields(city = %city))]
    pub async fn geocode(
        &self,
        city: &str,
        api_key: &str,
    ) -> Result<Vec<GeocodeEntry>, OpenWeatherError> {
        let url = format!("{}/geo/1.0/direct", self.config.base_url);
        debug!(url = %url, "Geocoding city");

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", api_key)])
            .send()
            .await
            .map_err(|e| Self::map_transport(&e))?;

        Self::check_status(response.status())?;

        response
            .json::<Vec<GeocodeEntry>>()
            .await
            .map_err(|e| OpenWeatherError::ParseError(e.to_string()))
    }

    /// Fetch current weather for a coordinate pair
    ///
    /// Calls `data/2.5/weather` with the configured unit system. The payload
    /// is parsed defensively; see [`CurrentObservation::from_response`].
    #[instrument(skip(self, api_key), fields(lat = %latitude, lon = %longitude))]
    pub async fn current(
        &self,
        latitude: f64,
        longitude: f64,
        api_key: &str,
    ) -> Result<CurrentObservation, OpenWeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = format!("{}/data/2.5/weather", self.config.base_url);
        debug!(url = %url, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("units", self.config.units.as_query_value().to_string()),
                ("appid", api_key.to_string()),
            ])
            .send()
            .await
            .map_err(|e| Self::map_transport(&e))?;

        Self::check_status(response.status())?;

        let payload: CurrentWeatherResponse = response
            .json()
            .await
            .map_err(|e| OpenWeatherError::ParseError(e.to_string()))?;

        Ok(CurrentObservation::from_response(&payload))
    }
}
