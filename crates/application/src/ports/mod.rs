//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these
//! ports; backend choice (cache technology, secret store technology, weather
//! provider) is an injected implementation detail.

mod cache_port;
mod geocoding_port;
mod secret_store;
mod weather_port;

pub use cache_port::{CachePort, CachePortExt, CacheStats, ttl};
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::{GeoCandidate, GeocodingPort};
pub use secret_store::SecretStorePort;
#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::{CurrentConditions, WeatherPort};
