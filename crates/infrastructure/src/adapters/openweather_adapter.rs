//! OpenWeatherMap adapter - implements `GeocodingPort` and `WeatherPort`
//!
//! Bridges the application ports to `integration_openweather`, attaching
//! the API credential to every call and translating client errors into the
//! application's upstream-failure class.

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{CurrentConditions, GeoCandidate, GeocodingPort, WeatherPort},
    services::CredentialProvider,
};
use async_trait::async_trait;
use domain::value_objects::{CardinalDirection, CityName, GeoPosition};
use integration_openweather::{OpenWeatherClient, OpenWeatherError};
use secrecy::ExposeSecret;
use tracing::{debug, instrument, warn};

/// Adapter for the OpenWeatherMap geocoding and current-weather APIs
pub struct OpenWeatherAdapter {
    client: OpenWeatherClient,
    credentials: Arc<CredentialProvider>,
}

impl std::fmt::Debug for OpenWeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherAdapter")
            .field("client", &"OpenWeatherClient")
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl OpenWeatherAdapter {
    /// Create a new adapter over a configured client and credential source
    pub fn new(client: OpenWeatherClient, credentials: Arc<CredentialProvider>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Map a client error to an application error
    ///
    /// A rejected credential drops the cached one so the next call
    /// re-fetches from the secret store (rotation fail-over); the current
    /// call still fails, since the core performs no retries.
    fn map_error(&self, err: &OpenWeatherError) -> ApplicationError {
        if matches!(err, OpenWeatherError::Unauthorized) {
            warn!("Upstream rejected the API credential, dropping cached value");
            self.credentials.invalidate();
        }
        ApplicationError::Upstream(err.to_string())
    }
}

#[async_trait]
impl GeocodingPort for OpenWeatherAdapter {
    #[instrument(skip(self), fields(city = %city))]
    async fn search(&self, city: &CityName) -> Result<Vec<GeoCandidate>, ApplicationError> {
        let credential = self.credentials.get().await?;
        let entries = self
            .client
            .geocode(city.as_str(), credential.expose_secret())
            .await
            .map_err(|e| self.map_error(&e))?;

        debug!(count = entries.len(), "Geocoding candidates received");

        let mut candidates = Vec::with_capacity(entries.len());
        for entry in entries {
            let position = GeoPosition::new(entry.lat, entry.lon).map_err(|_| {
                ApplicationError::Upstream(format!(
                    "geocoder returned out-of-range coordinates for '{}'",
                    entry.name
                ))
            })?;
            candidates.push(GeoCandidate {
                name: entry.name,
                position,
            });
        }

        Ok(candidates)
    }
}

#[async_trait]
impl WeatherPort for OpenWeatherAdapter {
    #[instrument(skip(self), fields(lat = position.latitude(), lon = position.longitude()))]
    async fn current(&self, position: &GeoPosition) -> Result<CurrentConditions, ApplicationError> {
        let credential = self.credentials.get().await?;
        let observation = self
            .client
            .current(
                position.latitude(),
                position.longitude(),
                credential.expose_secret(),
            )
            .await
            .map_err(|e| self.map_error(&e))?;

        debug!(
            temperature = observation.temperature,
            condition = %observation.condition,
            "Current conditions received"
        );

        Ok(CurrentConditions {
            temperature: observation.temperature,
            condition: observation.condition,
            pressure: observation.pressure,
            humidity: observation.humidity,
            wind_speed: observation.wind_speed,
            wind_direction: CardinalDirection::from_degrees(observation.wind_direction_deg),
        })
    }
}
