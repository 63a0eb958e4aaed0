//! Cache implementations
//!
//! Provides the caching adapter for the application layer:
//! - `MokaCache`: in-memory concurrent cache with optional TTL eviction
//!
//! The lookup flow runs two independent instances: a never-expiring geo
//! cache and a TTL-bounded weather cache.

mod moka_cache;

pub use moka_cache::{MokaCache, MokaCacheConfig};
