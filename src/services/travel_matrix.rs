//! Pairwise travel-time matrix over a set of addresses
//!
//! Each directed off-diagonal pair is routed through [`GeoRouteClient`]; pairs
//! it can't answer get the offline estimate instead, so a build always
//! finishes with a complete matrix.

use std::collections::HashSet;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use super::estimator::estimate_minutes;
use super::geo_route::GeoRouteClient;
use crate::types::{Address, TravelEntry, TravelTimeMatrix};

/// Progress callback: `(pairs done, total pairs)`
pub type ProgressFn<'a> = &'a mut (dyn FnMut(usize, usize) + Send);

pub struct TravelMatrixBuilder {
    client: GeoRouteClient,
    concurrency: usize,
}

impl TravelMatrixBuilder {
    pub fn new(client: GeoRouteClient) -> Self {
        Self {
            client,
            concurrency: 1,
        }
    }

    /// Route up to `n` pairs at once (at least 1)
    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    /// Travel entry for one directed pair, falling back to the estimate
    pub async fn resolve_pair(&self, origin: &str, destination: &str) -> TravelEntry {
        if origin == destination {
            return TravelEntry::Resolved(0);
        }

        match self.client.resolve_travel_minutes(origin, destination).await {
            Some(minutes) => TravelEntry::Resolved(minutes),
            None => {
                let minutes = estimate_minutes(origin, destination);
                debug!("Estimated {} -> {}: {} min", origin, destination, minutes);
                TravelEntry::Estimated(minutes)
            }
        }
    }

    /// Build the full matrix for `addresses`.
    ///
    /// Duplicate addresses are dropped (first occurrence kept). The callback
    /// runs once per off-diagonal pair as it completes, with a strictly
    /// increasing `done` that ends at `total = n * (n - 1)`.
    pub async fn build_matrix(
        &self,
        addresses: &[Address],
        mut on_progress: Option<ProgressFn<'_>>,
    ) -> TravelTimeMatrix {
        let mut seen = HashSet::new();
        let addresses: Vec<Address> = addresses
            .iter()
            .filter(|a| seen.insert(a.as_str()))
            .cloned()
            .collect();

        let pairs: Vec<(Address, Address)> = addresses
            .iter()
            .flat_map(|origin| {
                addresses
                    .iter()
                    .filter(move |destination| *destination != origin)
                    .map(move |destination| (origin.clone(), destination.clone()))
            })
            .collect();
        let total = pairs.len();

        info!(
            "Building travel matrix for {} addresses ({} pairs, provider {})",
            addresses.len(),
            total,
            self.client.provider_name()
        );
        let started = Instant::now();

        let mut matrix = TravelTimeMatrix::with_addresses(addresses);

        let mut results = stream::iter(pairs)
            .map(|(origin, destination)| async move {
                let entry = self.resolve_pair(&origin, &destination).await;
                (origin, destination, entry)
            })
            .buffer_unordered(self.concurrency);

        let mut done = 0;
        while let Some((origin, destination, entry)) = results.next().await {
            matrix.insert(origin, destination, entry);
            done += 1;
            if let Some(callback) = on_progress.as_deref_mut() {
                callback(done, total);
            }
        }

        info!(
            "Travel matrix complete: {} pairs, {} estimated, {:.1?}",
            total,
            matrix.estimated_count(),
            started.elapsed()
        );

        matrix
    }
}
