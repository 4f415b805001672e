//! `matrix` command: print the travel-time matrix for a reservations file

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::{build_travel_matrix, load_reservations};
use crate::config::Config;
use crate::types::{TravelEntry, TravelTimeMatrix};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MatrixCell<'a> {
    origin: &'a str,
    destination: &'a str,
    #[serde(flatten)]
    entry: TravelEntry,
}

pub async fn run(config: &Config, reservations: &Path, json: bool) -> Result<()> {
    let reservations = load_reservations(reservations)?;
    let matrix = build_travel_matrix(config, &reservations).await;

    if json {
        println!("{}", render_json(&matrix)?);
    } else {
        println!("{}", render_table(&matrix));
    }
    Ok(())
}

/// Off-diagonal cells in input order, origin-major
fn cells(matrix: &TravelTimeMatrix) -> Vec<MatrixCell<'_>> {
    let addresses = matrix.addresses();
    let mut cells = Vec::new();
    for origin in addresses {
        for destination in addresses {
            if origin == destination {
                continue;
            }
            if let Some(entry) = matrix.entry(origin, destination) {
                cells.push(MatrixCell { origin, destination, entry });
            }
        }
    }
    cells
}

fn render_json(matrix: &TravelTimeMatrix) -> Result<String> {
    Ok(serde_json::to_string_pretty(&cells(matrix))?)
}

fn render_table(matrix: &TravelTimeMatrix) -> String {
    let mut lines: Vec<String> = cells(matrix)
        .into_iter()
        .map(|c| {
            let marker = if c.entry.is_estimated() { " (est.)" } else { "" };
            format!("{} → {}: {}분{}", c.origin, c.destination, c.entry.minutes(), marker)
        })
        .collect();
    lines.push(format!(
        "{} addresses, {} of {} pairs estimated",
        matrix.addresses().len(),
        matrix.estimated_count(),
        matrix.len().saturating_sub(matrix.addresses().len()),
    ));
    lines.join("\n")
}
