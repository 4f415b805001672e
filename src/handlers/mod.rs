//! Command handlers
//!
//! One module per CLI command. Each reads its input files, calls the services
//! and prints the result.

pub mod check;
pub mod context;
pub mod export;
pub mod matrix;

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::services::geo_route::GeoRouteClient;
use crate::services::import::{parse_participants, parse_reservations};
use crate::services::routing::{create_route_provider, RouteProvider};
use crate::services::travel_matrix::TravelMatrixBuilder;
use crate::types::{distinct_addresses, parse_scenarios, Participant, Reservation, Scenario, TravelTimeMatrix};

pub(crate) fn load_reservations(path: &Path) -> Result<Vec<Reservation>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    parse_reservations(file).with_context(|| format!("Failed to import {}", path.display()))
}

pub(crate) fn load_participants(path: &Path) -> Result<Vec<Participant>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    parse_participants(file).with_context(|| format!("Failed to import {}", path.display()))
}

pub(crate) fn load_scenarios(path: &Path) -> Result<Vec<Scenario>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_scenarios(&text)
}

/// Build the travel matrix for every address the reservations reference
pub(crate) async fn build_travel_matrix(
    config: &Config,
    reservations: &[Reservation],
) -> TravelTimeMatrix {
    let provider: Arc<dyn RouteProvider> = Arc::from(create_route_provider(config));
    let builder = TravelMatrixBuilder::new(GeoRouteClient::new(provider))
        .with_concurrency(config.matrix_concurrency);

    let addresses = distinct_addresses(reservations);
    let mut log_progress = |done: usize, total: usize| {
        info!("Travel matrix progress: {}/{}", done, total);
    };

    builder.build_matrix(&addresses, Some(&mut log_progress)).await
}
