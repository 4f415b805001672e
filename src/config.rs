//! Configuration management

use anyhow::{Context, Result};

use crate::defaults::{
    DEFAULT_DIRECTIONS_URL, DEFAULT_GEOCODE_URL, DEFAULT_MATRIX_CONCURRENCY,
    DEFAULT_ROUTE_TIMEOUT_SECS,
};
use crate::services::routing::NaverConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Naver Maps settings (None when credentials are not set, travel times
    /// then come from the offline estimator)
    pub naver: Option<NaverConfig>,

    /// Maximum number of address pairs routed at once
    pub matrix_concurrency: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let naver = match (
            non_empty_var("NAVER_MAPS_CLIENT_ID"),
            non_empty_var("NAVER_MAPS_CLIENT_SECRET"),
        ) {
            (Some(client_id), Some(client_secret)) => {
                let timeout_seconds = match non_empty_var("ROUTE_TIMEOUT_SECS") {
                    Some(raw) => raw
                        .parse()
                        .with_context(|| format!("ROUTE_TIMEOUT_SECS must be a number, got '{}'", raw))?,
                    None => DEFAULT_ROUTE_TIMEOUT_SECS,
                };
                if timeout_seconds == 0 {
                    anyhow::bail!("ROUTE_TIMEOUT_SECS must be at least 1");
                }

                Some(NaverConfig {
                    client_id,
                    client_secret,
                    geocode_url: non_empty_var("NAVER_GEOCODE_URL")
                        .unwrap_or_else(|| DEFAULT_GEOCODE_URL.to_string()),
                    directions_url: non_empty_var("NAVER_DIRECTIONS_URL")
                        .unwrap_or_else(|| DEFAULT_DIRECTIONS_URL.to_string()),
                    timeout_seconds,
                })
            }
            (None, None) => None,
            _ => {
                tracing::warn!(
                    "Only one of NAVER_MAPS_CLIENT_ID / NAVER_MAPS_CLIENT_SECRET is set, ignoring both"
                );
                None
            }
        };

        let matrix_concurrency = match non_empty_var("MATRIX_CONCURRENCY") {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("MATRIX_CONCURRENCY must be a number, got '{}'", raw))?
                .max(1),
            None => DEFAULT_MATRIX_CONCURRENCY,
        };

        Ok(Self {
            naver,
            matrix_concurrency,
        })
    }

    /// Names of settings an operator would normally want and that are missing
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.naver.is_none() {
            missing.push("NAVER_MAPS_CLIENT_ID");
            missing.push("NAVER_MAPS_CLIENT_SECRET");
        }
        missing
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
