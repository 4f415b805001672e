//! Cached geocode-then-route lookups for a single address pair
//!
//! Every outcome is cached for the lifetime of the client, absence included:
//! asking twice for the same address (or the same directed pair) never hits
//! the network twice. Provider errors are logged and turned into `None`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use super::routing::RouteProvider;
use crate::types::{Address, Coordinates};

const MILLIS_PER_MINUTE: u64 = 60_000;

pub struct GeoRouteClient {
    provider: Arc<dyn RouteProvider>,
    geocodes: RwLock<HashMap<Address, Option<Coordinates>>>,
    routes: RwLock<HashMap<(Address, Address), Option<u32>>>,
}

impl GeoRouteClient {
    pub fn new(provider: Arc<dyn RouteProvider>) -> Self {
        Self {
            provider,
            geocodes: RwLock::new(HashMap::new()),
            routes: RwLock::new(HashMap::new()),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Driving minutes from `origin` to `destination` (fastest real-time
    /// route, floored to whole minutes), or `None` if either address can't be
    /// geocoded, no route exists, or the service failed.
    ///
    /// Callers handle `origin == destination` themselves.
    pub async fn resolve_travel_minutes(&self, origin: &str, destination: &str) -> Option<u32> {
        let key = (origin.to_string(), destination.to_string());
        if let Some(cached) = self.routes.read().get(&key) {
            return *cached;
        }

        let minutes = self.fetch_travel_minutes(origin, destination).await;
        *self.routes.write().entry(key).or_insert(minutes)
    }

    async fn fetch_travel_minutes(&self, origin: &str, destination: &str) -> Option<u32> {
        let from = self.geocode(origin).await;
        let to = self.geocode(destination).await;

        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                warn!("Failed to geocode: {} -> {}", origin, destination);
                return None;
            }
        };

        match self.provider.route_duration_ms(&from, &to).await {
            Ok(Some(duration_ms)) => {
                let minutes = u32::try_from(duration_ms / MILLIS_PER_MINUTE).unwrap_or(u32::MAX);
                debug!("Route {} -> {}: {} min", origin, destination, minutes);
                Some(minutes)
            }
            Ok(None) => {
                warn!("No route found: {} -> {}", origin, destination);
                None
            }
            Err(e) => {
                warn!("Directions error: {} -> {}: {:#}", origin, destination, e);
                None
            }
        }
    }

    /// Coordinates of `address`, cached
    pub async fn geocode(&self, address: &str) -> Option<Coordinates> {
        if let Some(cached) = self.geocodes.read().get(address) {
            return *cached;
        }

        let coords = match self.provider.geocode(address).await {
            Ok(coords) => coords,
            Err(e) => {
                warn!("Geocoding error for '{}': {:#}", address, e);
                None
            }
        };

        *self
            .geocodes
            .write()
            .entry(address.to_string())
            .or_insert(coords)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider with canned answers that counts its calls
    #[derive(Default)]
    pub(crate) struct CountingProvider {
        pub coordinates: HashMap<String, Coordinates>,
        /// keyed by origin longitude, so tests can give each direction its own answer
        pub durations_ms: HashMap<String, u64>,
        pub fail_routes: bool,
        pub geocode_calls: AtomicUsize,
        pub route_calls: AtomicUsize,
    }

    impl CountingProvider {
        pub(crate) fn with_places(places: &[(&str, f64, f64)]) -> Self {
            Self {
                coordinates: places
                    .iter()
                    .map(|(a, lng, lat)| (a.to_string(), Coordinates::from_lng_lat(*lng, *lat)))
                    .collect(),
                ..Default::default()
            }
        }

        pub(crate) fn route_from(mut self, origin_lng: f64, duration_ms: u64) -> Self {
            self.durations_ms.insert(origin_lng.to_string(), duration_ms);
            self
        }
    }

    #[async_trait]
    impl RouteProvider for CountingProvider {
        async fn geocode(&self, address: &str) -> Result<Option<Coordinates>> {
            self.geocode_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.coordinates.get(address).copied())
        }

        async fn route_duration_ms(&self, from: &Coordinates, _to: &Coordinates) -> Result<Option<u64>> {
            self.route_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_routes {
                anyhow::bail!("connection reset");
            }
            Ok(self.durations_ms.get(&from.lng.to_string()).copied())
        }

        fn name(&self) -> &str {
            "Counting"
        }
    }

    /// Provider whose every call fails, like an unreachable service
    pub(crate) struct UnreachableProvider;

    #[async_trait]
    impl RouteProvider for UnreachableProvider {
        async fn geocode(&self, _address: &str) -> Result<Option<Coordinates>> {
            anyhow::bail!("dns error: failed to lookup address information")
        }

        async fn route_duration_ms(&self, _from: &Coordinates, _to: &Coordinates) -> Result<Option<u64>> {
            anyhow::bail!("dns error: failed to lookup address information")
        }

        fn name(&self) -> &str {
            "Unreachable"
        }
    }

    fn two_places() -> CountingProvider {
        CountingProvider::with_places(&[("A", 127.0, 37.5), ("B", 126.9, 37.55)])
    }

    #[tokio::test]
    async fn test_duration_is_floored_to_minutes() {
        let provider = Arc::new(two_places().route_from(127.0, 25 * 60_000 + 59_999));
        let client = GeoRouteClient::new(provider);

        assert_eq!(client.resolve_travel_minutes("A", "B").await, Some(25));
    }

    #[tokio::test]
    async fn test_repeated_pair_hits_network_once() {
        let provider = Arc::new(two_places().route_from(127.0, 600_000));
        let client = GeoRouteClient::new(provider.clone());

        assert_eq!(client.resolve_travel_minutes("A", "B").await, Some(10));
        assert_eq!(client.resolve_travel_minutes("A", "B").await, Some(10));

        assert_eq!(provider.route_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.geocode_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_geocode_cached_across_pairs() {
        let provider = Arc::new(two_places().route_from(127.0, 600_000).route_from(126.9, 660_000));
        let client = GeoRouteClient::new(provider.clone());

        assert_eq!(client.resolve_travel_minutes("A", "B").await, Some(10));
        assert_eq!(client.resolve_travel_minutes("B", "A").await, Some(11));

        // Directions are routed independently, addresses geocoded once each
        assert_eq!(provider.route_calls.load(Ordering::SeqCst), 2);
        assert_eq!(provider.geocode_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unknown_address_is_none_and_cached() {
        let provider = Arc::new(two_places());
        let client = GeoRouteClient::new(provider.clone());

        assert_eq!(client.resolve_travel_minutes("A", "nowhere").await, None);
        assert_eq!(client.geocode("nowhere").await, None);

        // Route never attempted, "nowhere" geocoded only once
        assert_eq!(provider.route_calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.geocode_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_route_is_none() {
        let client = GeoRouteClient::new(Arc::new(two_places()));
        assert_eq!(client.resolve_travel_minutes("A", "B").await, None);
    }

    #[tokio::test]
    async fn test_route_error_is_none() {
        let mut provider = two_places().route_from(127.0, 600_000);
        provider.fail_routes = true;
        let client = GeoRouteClient::new(Arc::new(provider));

        assert_eq!(client.resolve_travel_minutes("A", "B").await, None);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_none() {
        let client = GeoRouteClient::new(Arc::new(UnreachableProvider));
        assert_eq!(client.geocode("A").await, None);
        assert_eq!(client.resolve_travel_minutes("A", "B").await, None);
    }
}
