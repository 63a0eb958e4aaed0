//! Test fixtures shared by service unit tests

use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::ApplicationError,
    ports::{CachePort, CacheStats},
};

/// In-memory cache backend for service tests
///
/// Stores raw bytes and ignores the TTL hint; expiry behavior is exercised
/// through the timestamps the services themselves store.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Vec<u8>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }
}

#[async_trait]
impl CachePort for MemoryCache {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, ApplicationError> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(bytes) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Ok(Some(bytes.clone()))
            },
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            },
        }
    }

    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        _ttl: Option<Duration>,
    ) -> Result<(), ApplicationError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<(), ApplicationError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: 0,
        }
    }
}

/// Cache backend that fails every operation, for fail-loud tests
#[derive(Debug, Default)]
pub struct BrokenCache;

#[async_trait]
impl CachePort for BrokenCache {
    async fn get_bytes(&self, _key: &str) -> Result<Option<Vec<u8>>, ApplicationError> {
        Err(ApplicationError::Upstream("cache unreachable".to_string()))
    }

    async fn set_bytes(
        &self,
        _key: &str,
        _value: Vec<u8>,
        _ttl: Option<Duration>,
    ) -> Result<(), ApplicationError> {
        Err(ApplicationError::Upstream("cache unreachable".to_string()))
    }

    async fn invalidate(&self, _key: &str) -> Result<(), ApplicationError> {
        Err(ApplicationError::Upstream("cache unreachable".to_string()))
    }

    fn stats(&self) -> CacheStats {
        CacheStats::default()
    }
}
