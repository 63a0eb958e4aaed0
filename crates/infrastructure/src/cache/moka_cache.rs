//! Moka in-memory cache implementation
//!
//! High-performance, thread-safe in-memory cache behind `CachePort`.
//! Inserts are atomic per key, so concurrent writers for the same city can
//! race without corrupting an entry.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use application::{
    error::ApplicationError,
    ports::{CachePort, CacheStats},
};
use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, instrument};

/// Maximum cache size in MB
const DEFAULT_MAX_CAPACITY_MB: u64 = 64;

/// Configuration for Moka cache
#[derive(Debug, Clone, Copy)]
pub struct MokaCacheConfig {
    /// Maximum capacity in megabytes
    pub max_capacity_mb: u64,
    /// Cache-level TTL; `None` keeps entries until evicted by capacity
    pub time_to_live: Option<Duration>,
}

impl Default for MokaCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity_mb: DEFAULT_MAX_CAPACITY_MB,
            time_to_live: None,
        }
    }
}

/// Moka-based in-memory cache
///
/// Note: Moka 0.12 uses a cache-level TTL configured at build time; the
/// per-call TTL hint on `set_bytes` is ignored here. The weather lookup
/// additionally checks stored timestamps on read, so backend eviction is a
/// memory-pressure concern, not the freshness authority.
pub struct MokaCache {
    cache: Cache<String, Vec<u8>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for MokaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCache")
            .field("entries", &self.cache.entry_count())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl MokaCache {
    /// Create a new Moka cache with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MokaCacheConfig::default())
    }

    /// Create a new Moka cache with custom configuration
    #[must_use]
    pub fn with_config(config: MokaCacheConfig) -> Self {
        let max_capacity_bytes = config.max_capacity_mb * 1024 * 1024;

        let mut builder = Cache::builder()
            .max_capacity(max_capacity_bytes)
            .weigher(|_key: &String, value: &Vec<u8>| -> u32 {
                // Weight by size in bytes, capped at u32::MAX
                value.len().try_into().unwrap_or(u32::MAX)
            });

        if let Some(ttl) = config.time_to_live {
            builder = builder.time_to_live(ttl);
        }

        Self {
            cache: builder.build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cache for geocoded positions: entries never expire
    #[must_use]
    pub fn for_geo_positions() -> Self {
        Self::with_config(MokaCacheConfig {
            time_to_live: None,
            ..MokaCacheConfig::default()
        })
    }

    /// Cache for weather snapshots, evicted at the snapshot TTL
    #[must_use]
    pub fn for_weather_snapshots(ttl: Duration) -> Self {
        Self::with_config(MokaCacheConfig {
            time_to_live: Some(ttl),
            ..MokaCacheConfig::default()
        })
    }
}

impl Default for MokaCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CachePort for MokaCache {
    #[instrument(skip(self), level = "debug")]
    #[allow(clippy::option_if_let_else)]
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, ApplicationError> {
        if let Some(bytes) = self.cache.get(key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Cache hit");
            Ok(Some(bytes))
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Cache miss");
            Ok(None)
        }
    }

    #[instrument(skip(self, value), level = "debug")]
    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        _ttl: Option<Duration>,
    ) -> Result<(), ApplicationError> {
        // Cache-level TTL applies; the per-call hint is ignored (see above)
        self.cache.insert(key.to_string(), value).await;
        debug!(key = %key, "Cache set");
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn invalidate(&self, key: &str) -> Result<(), ApplicationError> {
        self.cache.invalidate(key).await;
        debug!(key = %key, "Cache invalidated");
        Ok(())
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
        }
    }
}
