//! Geocoding + routing providers
//!
//! Uses the Naver Maps API in production, an offline provider when no
//! credentials are configured (every pair then falls back to the estimator).

mod naver;

pub use naver::{NaverConfig, NaverMapsClient};

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::Config;
use crate::types::Coordinates;

/// Remote geocode-then-route service
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Coordinates of `address`, `None` when the service knows no match
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>>;

    /// Duration in milliseconds of the fastest real-time route, `None` when
    /// the service returns no usable route
    async fn route_duration_ms(&self, from: &Coordinates, to: &Coordinates) -> Result<Option<u64>>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Provider used when the routing service is not configured.
/// Never resolves anything.
#[derive(Debug, Default)]
pub struct OfflineProvider;

#[async_trait]
impl RouteProvider for OfflineProvider {
    async fn geocode(&self, _address: &str) -> Result<Option<Coordinates>> {
        Ok(None)
    }

    async fn route_duration_ms(&self, _from: &Coordinates, _to: &Coordinates) -> Result<Option<u64>> {
        Ok(None)
    }

    fn name(&self) -> &str {
        "Offline"
    }
}

/// Create the route provider from configuration, falling back to the offline
/// provider when credentials are missing or the HTTP client can't be built
pub fn create_route_provider(config: &Config) -> Box<dyn RouteProvider> {
    match &config.naver {
        Some(naver) => match NaverMapsClient::new(naver.clone()) {
            Ok(client) => {
                info!("Using Naver Maps routing ({})", naver.directions_url);
                Box::new(client)
            }
            Err(e) => {
                warn!("Naver Maps client unavailable: {:#}. Falling back to offline estimates.", e);
                Box::new(OfflineProvider)
            }
        },
        None => {
            info!("Naver Maps credentials not set, using offline travel estimates");
            Box::new(OfflineProvider)
        }
    }
}
