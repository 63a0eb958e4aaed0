//! Cache-aside weather lookup orchestration
//!
//! The core use case: given a city name, serve a normalized current-weather
//! snapshot, short-circuiting through the weather cache, then the geo cache,
//! and only then the upstream APIs.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use domain::{
    entities::{WeatherCondition, WeatherSnapshot, Wind},
    value_objects::CityName,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{CachePort, CachePortExt, WeatherPort, ttl},
    services::GeoResolver,
};

/// A weather snapshot together with its insertion time
///
/// Freshness is decided on read: an entry older than the TTL behaves as a
/// miss even if the backend still holds its bytes, so stale data is never
/// served. There is no background sweeper; the hit path stays cheap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSnapshot {
    /// The stored snapshot
    pub snapshot: WeatherSnapshot,
    /// When the snapshot was written
    pub inserted_at: DateTime<Utc>,
}

impl CachedSnapshot {
    /// Whether the entry is still valid: `now - inserted_at < ttl`
    #[must_use]
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.inserted_at);
        // A TTL too large for chrono means the entry never expires
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => age < ttl,
            Err(_) => true,
        }
    }
}

/// Two-tier cache-aside lookup orchestrator
///
/// Owns no long-lived state itself; it coordinates the weather cache, the
/// geo resolver (with its own cache), and the upstream weather port. Shared
/// across concurrent requests behind an `Arc`. Concurrent misses for the
/// same city may each call upstream; the last writer wins, which is safe
/// because writes are atomic per key.
pub struct WeatherLookupService {
    geo_resolver: GeoResolver,
    weather: Arc<dyn WeatherPort>,
    cache: Arc<dyn CachePort>,
    snapshot_ttl: Duration,
}

impl std::fmt::Debug for WeatherLookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherLookupService")
            .field("geo_resolver", &self.geo_resolver)
            .field("cache", &self.cache)
            .field("snapshot_ttl", &self.snapshot_ttl)
            .finish_non_exhaustive()
    }
}

impl WeatherLookupService {
    /// Create the orchestrator with the default one-minute snapshot TTL
    pub fn new(
        geo_resolver: GeoResolver,
        weather: Arc<dyn WeatherPort>,
        cache: Arc<dyn CachePort>,
    ) -> Self {
        Self {
            geo_resolver,
            weather,
            cache,
            snapshot_ttl: ttl::WEATHER_SNAPSHOT,
        }
    }

    /// Override the snapshot TTL
    #[must_use]
    pub const fn with_snapshot_ttl(mut self, snapshot_ttl: Duration) -> Self {
        self.snapshot_ttl = snapshot_ttl;
        self
    }

    /// Cache key for a city's weather snapshot
    fn cache_key(city: &CityName) -> String {
        format!("weather:{}", city.normalized())
    }

    /// Look up current weather for a city
    ///
    /// Returns `Ok(None)` when the city geocodes to nothing (not an error;
    /// callers should not retry). Any upstream or cache-backend failure is
    /// [`ApplicationError::Upstream`]; a failed fetch never leaves a partial
    /// cache entry. No retries happen here - retry policy belongs to the
    /// boundary.
    #[instrument(skip(self), fields(city = %city))]
    pub async fn lookup(
        &self,
        city: &CityName,
    ) -> Result<Option<WeatherSnapshot>, ApplicationError> {
        let key = Self::cache_key(city);

        if let Some(entry) = self.cache.get::<CachedSnapshot>(&key).await? {
            if entry.is_fresh(self.snapshot_ttl, Utc::now()) {
                debug!("Weather cache hit");
                return Ok(Some(entry.snapshot));
            }
            debug!("Weather cache entry expired");
        }

        let Some(position) = self.geo_resolver.resolve(city).await? else {
            info!("City is unknown to the geocoder");
            return Ok(None);
        };

        let conditions = self.weather.current(&position).await?;
        let snapshot = WeatherSnapshot::new(
            city.as_str(),
            conditions.temperature,
            WeatherCondition {
                kind: conditions.condition,
                pressure: conditions.pressure,
                humidity: conditions.humidity,
            },
            Wind {
                speed: conditions.wind_speed,
                direction: conditions.wind_direction,
            },
        );

        let entry = CachedSnapshot {
            snapshot: snapshot.clone(),
            inserted_at: Utc::now(),
        };
        self.cache.set(&key, &entry, Some(self.snapshot_ttl)).await?;
        info!("Weather snapshot refreshed");

        Ok(Some(snapshot))
    }
}
