//! Naver Maps geocoding + driving directions client
//!
//! API documentation:
//! https://api.ncloud-docs.com/docs/ai-naver-mapsgeocoding
//! https://api.ncloud-docs.com/docs/ai-naver-mapsdirections

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::RouteProvider;
use crate::defaults::{DEFAULT_DIRECTIONS_URL, DEFAULT_GEOCODE_URL, DEFAULT_ROUTE_TIMEOUT_SECS};
use crate::types::Coordinates;

const HEADER_KEY_ID: &str = "X-NCP-APIGW-API-KEY-ID";
const HEADER_KEY: &str = "X-NCP-APIGW-API-KEY";

/// Naver Maps client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaverConfig {
    pub client_id: String,
    pub client_secret: String,
    pub geocode_url: String,
    pub directions_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl NaverConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            directions_url: DEFAULT_DIRECTIONS_URL.to_string(),
            timeout_seconds: DEFAULT_ROUTE_TIMEOUT_SECS,
        }
    }
}

/// Naver Maps routing client
pub struct NaverMapsClient {
    client: Client,
    config: NaverConfig,
}

impl NaverMapsClient {
    pub fn new(config: NaverConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header(HEADER_KEY_ID, &self.config.client_id)
            .header(HEADER_KEY, &self.config.client_secret)
    }
}

#[async_trait]
impl RouteProvider for NaverMapsClient {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>> {
        let url = format!(
            "{}?query={}",
            self.config.geocode_url,
            urlencoding::encode(address)
        );

        let response = self
            .get(&url)
            .send()
            .await
            .context("Failed to send geocoding request")?
            .error_for_status()
            .context("Geocoding request rejected")?;

        let body: GeocodeResponse = response
            .json()
            .await
            .context("Failed to parse geocoding response")?;

        coordinates_from_geocode(&body)
    }

    async fn route_duration_ms(&self, from: &Coordinates, to: &Coordinates) -> Result<Option<u64>> {
        let url = format!(
            "{}?start={}&goal={}&option=trafast",
            self.config.directions_url,
            urlencoding::encode(&from.to_lng_lat_param()),
            urlencoding::encode(&to.to_lng_lat_param()),
        );

        debug!("Requesting trafast route {:?} -> {:?}", from, to);

        let response = self
            .get(&url)
            .send()
            .await
            .context("Failed to send directions request")?
            .error_for_status()
            .context("Directions request rejected")?;

        let body: DirectionsResponse = response
            .json()
            .await
            .context("Failed to parse directions response")?;

        Ok(duration_from_directions(&body))
    }

    fn name(&self) -> &str {
        "NaverMaps"
    }
}

// Naver API types

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    addresses: Vec<GeocodeAddress>,
}

#[derive(Debug, Deserialize)]
struct GeocodeAddress {
    /// Longitude as decimal string
    x: String,
    /// Latitude as decimal string
    y: String,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default = "no_code")]
    code: i64,
    #[serde(default)]
    route: Option<DirectionsRoutes>,
}

fn no_code() -> i64 {
    -1
}

#[derive(Debug, Deserialize)]
struct DirectionsRoutes {
    #[serde(default)]
    trafast: Vec<RouteOption>,
}

#[derive(Debug, Deserialize)]
struct RouteOption {
    summary: RouteSummary,
}

#[derive(Debug, Deserialize)]
struct RouteSummary {
    /// Milliseconds
    duration: u64,
}

fn coordinates_from_geocode(body: &GeocodeResponse) -> Result<Option<Coordinates>> {
    if body.status != "OK" {
        return Ok(None);
    }

    match body.addresses.first() {
        Some(first) => {
            let lng: f64 = first.x.parse().context("Invalid longitude")?;
            let lat: f64 = first.y.parse().context("Invalid latitude")?;
            Ok(Some(Coordinates::from_lng_lat(lng, lat)))
        }
        None => Ok(None),
    }
}

fn duration_from_directions(body: &DirectionsResponse) -> Option<u64> {
    if body.code != 0 {
        return None;
    }
    body.route
        .as_ref()
        .and_then(|r| r.trafast.first())
        .map(|option| option.summary.duration)
}
