//! Cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Cache capacity and TTL settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Weather snapshot TTL in seconds
    #[serde(default = "default_weather_ttl_secs")]
    pub weather_ttl_secs: u64,

    /// Maximum capacity per cache in megabytes
    #[serde(default = "default_max_capacity_mb")]
    pub max_capacity_mb: u64,
}

const fn default_weather_ttl_secs() -> u64 {
    60
}

const fn default_max_capacity_mb() -> u64 {
    64
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            weather_ttl_secs: default_weather_ttl_secs(),
            max_capacity_mb: default_max_capacity_mb(),
        }
    }
}

impl CacheConfig {
    /// Weather snapshot TTL as a `Duration`
    #[must_use]
    pub const fn weather_ttl(&self) -> Duration {
        Duration::from_secs(self.weather_ttl_secs)
    }
}
