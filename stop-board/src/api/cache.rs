//! Short-lived cache for departure lookups.
//!
//! Every favourite preview fetches departures independently, often for
//! a stop the board has just loaded. Caching successful lookups for a
//! short TTL lets them share one request. Selecting a stop always goes
//! to the API and refreshes the entry, and failures are never cached, so
//! a user-initiated retry always reaches the API.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{Departure, Favourite, FavouriteId, StopId, StopSelection};

use super::error::ApiError;
use super::transit::TransitApi;

/// Cached departure list for one stop.
type DepartureEntry = Arc<Vec<Departure>>;

/// Configuration for the departure cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries. Zero disables caching.
    pub ttl: Duration,

    /// Maximum number of cached stops.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Whether lookups should be cached at all.
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10),
            max_capacity: 500,
        }
    }
}

/// Transit API wrapper that caches departure lookups.
///
/// Favourite operations pass straight through.
pub struct CachedApi<A> {
    inner: A,
    departures: Option<MokaCache<StopId, DepartureEntry>>,
}

impl<A> CachedApi<A> {
    /// Wrap `inner` with a cache built from `config`.
    pub fn new(inner: A, config: &CacheConfig) -> Self {
        let departures = config.is_enabled().then(|| {
            MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build()
        });

        Self { inner, departures }
    }

    /// Access the wrapped API for operations that bypass the cache.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Number of cached stops.
    pub fn entry_count(&self) -> u64 {
        self.departures.as_ref().map_or(0, |c| c.entry_count())
    }
}

impl<A: TransitApi> TransitApi for CachedApi<A> {
    async fn departures(&self, stop: &StopId) -> Result<Vec<Departure>, ApiError> {
        let Some(cache) = &self.departures else {
            return self.inner.departures(stop).await;
        };

        if let Some(cached) = cache.get(stop).await {
            trace!(%stop, "departure cache hit");
            return Ok(cached.as_ref().clone());
        }

        let departures = self.inner.departures(stop).await?;
        cache
            .insert(stop.clone(), Arc::new(departures.clone()))
            .await;

        Ok(departures)
    }

    async fn fresh_departures(&self, stop: &StopId) -> Result<Vec<Departure>, ApiError> {
        let departures = self.inner.fresh_departures(stop).await?;
        if let Some(cache) = &self.departures {
            cache
                .insert(stop.clone(), Arc::new(departures.clone()))
                .await;
        }
        Ok(departures)
    }

    async fn favourites(&self) -> Result<Vec<Favourite>, ApiError> {
        self.inner.favourites().await
    }

    async fn add_favourite(&self, stop: &StopSelection) -> Result<(), ApiError> {
        self.inner.add_favourite(stop).await
    }

    async fn remove_favourite(&self, id: FavouriteId) -> Result<(), ApiError> {
        self.inner.remove_favourite(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApi;

    fn stop(id: &str) -> StopId {
        StopId::parse(id).unwrap()
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(10));
        assert_eq!(config.max_capacity, 500);
        assert!(config.is_enabled());
    }

    #[test]
    fn zero_ttl_disables_cache() {
        let config = CacheConfig {
            ttl: Duration::ZERO,
            ..CacheConfig::default()
        };
        assert!(!config.is_enabled());
    }

    #[tokio::test]
    async fn repeated_lookups_share_one_request() {
        let mock = MockApi::new();
        mock.set_departures(&stop("147"), vec![Departure::new("D", "Nussdorf", 3)]);
        let api = CachedApi::new(mock, &CacheConfig::default());

        let first = api.departures(&stop("147")).await.unwrap();
        let second = api.departures(&stop("147")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(api.inner().departure_requests(), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let mock = MockApi::new();
        mock.fail_departures(&stop("147"));
        let api = CachedApi::new(mock, &CacheConfig::default());

        assert!(api.departures(&stop("147")).await.is_err());

        api.inner()
            .set_departures(&stop("147"), vec![Departure::new("D", "Nussdorf", 3)]);
        let retried = api.departures(&stop("147")).await.unwrap();

        assert_eq!(retried.len(), 1);
        assert_eq!(api.inner().departure_requests(), 2);
    }

    #[tokio::test]
    async fn fresh_lookup_bypasses_and_refills_cache() {
        let mock = MockApi::new();
        mock.set_departures(&stop("147"), vec![Departure::new("D", "Nussdorf", 3)]);
        let api = CachedApi::new(mock, &CacheConfig::default());
        api.departures(&stop("147")).await.unwrap();

        api.inner()
            .set_departures(&stop("147"), vec![Departure::new("D", "Nussdorf", 1)]);
        let fresh = api.fresh_departures(&stop("147")).await.unwrap();
        assert_eq!(fresh[0].countdown, 1);
        assert_eq!(api.inner().departure_requests(), 2);

        // Later cached lookups see the refreshed list
        let cached = api.departures(&stop("147")).await.unwrap();
        assert_eq!(cached, fresh);
        assert_eq!(api.inner().departure_requests(), 2);
    }

    #[tokio::test]
    async fn disabled_cache_always_fetches() {
        let mock = MockApi::new();
        mock.set_departures(&stop("147"), vec![]);
        let config = CacheConfig {
            ttl: Duration::ZERO,
            ..CacheConfig::default()
        };
        let api = CachedApi::new(mock, &config);

        api.departures(&stop("147")).await.unwrap();
        api.departures(&stop("147")).await.unwrap();

        assert_eq!(api.inner().departure_requests(), 2);
        assert_eq!(api.entry_count(), 0);
    }
}
