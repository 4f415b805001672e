//! `export` command: write one scenario as CSV

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::load_scenarios;
use crate::services::export::{export_rows, write_csv};
use crate::types::Scenario;

pub fn run(scenarios: &Path, scenario_id: u32, out: Option<&Path>) -> Result<()> {
    let scenarios = load_scenarios(scenarios)?;
    let scenario = find_scenario(&scenarios, scenario_id)?;
    let rows = export_rows(scenario);

    match out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_csv(&rows, file)?;
            info!("Exported {} rows to {}", rows.len(), path.display());
        }
        None => write_csv(&rows, std::io::stdout().lock())?,
    }
    Ok(())
}

fn find_scenario(scenarios: &[Scenario], scenario_id: u32) -> Result<&Scenario> {
    scenarios
        .iter()
        .find(|s| s.scenario_id == scenario_id)
        .with_context(|| {
            let ids: Vec<String> = scenarios.iter().map(|s| s.scenario_id.to_string()).collect();
            format!(
                "Scenario {} not found (available: {})",
                scenario_id,
                ids.join(", ")
            )
        })
}
