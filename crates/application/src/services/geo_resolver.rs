//! City-to-coordinates resolution with a persistent cache
//!
//! First tier of the lookup flow: maps a city name to a `GeoPosition`,
//! consulting a never-expiring cache before the upstream geocoder.

use std::sync::Arc;

use domain::value_objects::{CityName, GeoPosition};
use tracing::{debug, instrument};

use crate::{
    error::ApplicationError,
    ports::{CachePort, CachePortExt, GeocodingPort},
};

/// Resolves city names to coordinates, cache-aside
///
/// Cached positions are kept indefinitely (cities don't move); only
/// administrative invalidation removes them. An unknown city is `Ok(None)`
/// and is deliberately **not** cached, so a later lookup retries upstream
/// once its data improves.
pub struct GeoResolver {
    geocoder: Arc<dyn GeocodingPort>,
    cache: Arc<dyn CachePort>,
}

impl std::fmt::Debug for GeoResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoResolver")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl GeoResolver {
    /// Create a resolver over a geocoder and its dedicated cache
    pub fn new(geocoder: Arc<dyn GeocodingPort>, cache: Arc<dyn CachePort>) -> Self {
        Self { geocoder, cache }
    }

    /// Cache key for a city, shared by all case variants of the name
    fn cache_key(city: &CityName) -> String {
        format!("geo:{}", city.normalized())
    }

    /// Resolve a city name to coordinates
    ///
    /// Returns `Ok(None)` when the upstream yields no candidates; transport
    /// and cache-backend failures propagate as
    /// [`ApplicationError::Upstream`].
    #[instrument(skip(self), fields(city = %city))]
    pub async fn resolve(&self, city: &CityName) -> Result<Option<GeoPosition>, ApplicationError> {
        let key = Self::cache_key(city);

        if let Some(position) = self.cache.get::<GeoPosition>(&key).await? {
            debug!("Geo cache hit");
            return Ok(Some(position));
        }

        let mut candidates = self.geocoder.search(city).await?;
        if candidates.is_empty() {
            debug!("No geocoding candidates");
            return Ok(None);
        }

        // First match wins; no disambiguation or ranking. Keyed by the
        // requested name so repeat variants resolve to the same entry.
        let first = candidates.swap_remove(0);
        debug!(candidate = %first.name, position = %first.position, "Caching geocoded position");
        self.cache.set(&key, &first.position, None).await?;

        Ok(Some(first.position))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ports::{GeoCandidate, MockGeocodingPort},
        services::testing::{BrokenCache, MemoryCache},
    };

    use super::*;

    fn london() -> GeoCandidate {
        GeoCandidate {
            name: "London".to_string(),
            position: GeoPosition::new_unchecked(51.5, -0.12),
        }
    }

    fn springfield_variants() -> Vec<GeoCandidate> {
        vec![
            GeoCandidate {
                name: "Springfield, IL".to_string(),
                position: GeoPosition::new_unchecked(39.78, -89.65),
            },
            GeoCandidate {
                name: "Springfield, MA".to_string(),
                position: GeoPosition::new_unchecked(42.1, -72.59),
            },
            GeoCandidate {
                name: "Springfield, MO".to_string(),
                position: GeoPosition::new_unchecked(37.21, -93.29),
            },
        ]
    }

    #[tokio::test]
    async fn miss_geocodes_and_caches_first_candidate() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_search()
            .times(1)
            .returning(|_| Ok(vec![london()]));
        let cache = Arc::new(MemoryCache::new());
        let resolver = GeoResolver::new(Arc::new(geocoder), cache.clone());

        let city = CityName::parse("London").unwrap();
        let position = resolver.resolve(&city).await.unwrap();

        assert_eq!(position, Some(GeoPosition::new_unchecked(51.5, -0.12)));
        assert!(cache.contains("geo:london").await);
    }

    #[tokio::test]
    async fn cache_hit_skips_upstream() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_search()
            .times(1)
            .returning(|_| Ok(vec![london()]));
        let cache = Arc::new(MemoryCache::new());
        let resolver = GeoResolver::new(Arc::new(geocoder), cache.clone());

        let city = CityName::parse("London").unwrap();
        resolver.resolve(&city).await.unwrap();
        // Second resolve must be served from cache; the mock allows one call
        let position = resolver.resolve(&city).await.unwrap();

        assert_eq!(position, Some(GeoPosition::new_unchecked(51.5, -0.12)));
    }

    #[tokio::test]
    async fn case_variants_share_the_cached_entry() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_search()
            .times(1)
            .returning(|_| Ok(vec![london()]));
        let cache = Arc::new(MemoryCache::new());
        let resolver = GeoResolver::new(Arc::new(geocoder), cache.clone());

        resolver
            .resolve(&CityName::parse("London").unwrap())
            .await
            .unwrap();
        let position = resolver
            .resolve(&CityName::parse("LONDON").unwrap())
            .await
            .unwrap();

        assert_eq!(position, Some(GeoPosition::new_unchecked(51.5, -0.12)));
    }

    #[tokio::test]
    async fn zero_candidates_returns_none_and_writes_nothing() {
        let mut geocoder = MockGeocodingPort::new();
        // Two calls expected: the empty result must not be cached
        geocoder.expect_search().times(2).returning(|_| Ok(vec![]));
        let cache = Arc::new(MemoryCache::new());
        let resolver = GeoResolver::new(Arc::new(geocoder), cache.clone());

        let city = CityName::parse("Atlantis").unwrap();
        assert_eq!(resolver.resolve(&city).await.unwrap(), None);
        assert!(!cache.contains("geo:atlantis").await);
        assert_eq!(resolver.resolve(&city).await.unwrap(), None);
    }

    #[tokio::test]
    async fn ambiguous_names_use_the_first_candidate_only() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_search()
            .times(1)
            .returning(|_| Ok(springfield_variants()));
        let cache = Arc::new(MemoryCache::new());
        let resolver = GeoResolver::new(Arc::new(geocoder), cache);

        let city = CityName::parse("Springfield").unwrap();
        let position = resolver.resolve(&city).await.unwrap();

        assert_eq!(position, Some(GeoPosition::new_unchecked(39.78, -89.65)));
    }

    #[tokio::test]
    async fn upstream_error_propagates() {
        let mut geocoder = MockGeocodingPort::new();
        geocoder
            .expect_search()
            .returning(|_| Err(ApplicationError::Upstream("connect timeout".to_string())));
        let cache = Arc::new(MemoryCache::new());
        let resolver = GeoResolver::new(Arc::new(geocoder), cache);

        let city = CityName::parse("London").unwrap();
        let result = resolver.resolve(&city).await;

        assert!(matches!(result, Err(ApplicationError::Upstream(_))));
    }

    #[tokio::test]
    async fn cache_backend_failure_fails_loudly() {
        let geocoder = MockGeocodingPort::new();
        let resolver = GeoResolver::new(Arc::new(geocoder), Arc::new(BrokenCache));

        let city = CityName::parse("London").unwrap();
        let result = resolver.resolve(&city).await;

        assert!(matches!(result, Err(ApplicationError::Upstream(_))));
    }
}
