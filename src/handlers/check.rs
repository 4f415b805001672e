//! `check` command: validate and score optimizer scenarios

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use super::{build_travel_matrix, load_participants, load_reservations, load_scenarios};
use crate::config::Config;
use crate::services::scenario_check::{ScenarioChecker, ScenarioReport};

pub struct CheckOptions<'a> {
    pub reservations: &'a Path,
    pub participants: &'a Path,
    pub scenarios: &'a Path,
    pub with_travel: bool,
    pub strict_capacity: bool,
    pub json: bool,
}

pub async fn run(config: &Config, options: CheckOptions<'_>) -> Result<()> {
    let reservations = load_reservations(options.reservations)?;
    let participants = load_participants(options.participants)?;
    let scenarios = load_scenarios(options.scenarios)?;

    info!(
        "Checking {} scenarios against {} reservations and {} participants",
        scenarios.len(),
        reservations.len(),
        participants.len()
    );
    if scenarios.is_empty() {
        warn!("No scenarios found in {}", options.scenarios.display());
    }

    let matrix = if options.with_travel {
        Some(build_travel_matrix(config, &reservations).await)
    } else {
        None
    };

    let mut checker = ScenarioChecker::new(&reservations, &participants);
    if let Some(matrix) = &matrix {
        checker = checker.with_travel_matrix(matrix);
    }
    if options.strict_capacity {
        checker = checker.strict_capacity();
    }

    let reports: Vec<ScenarioReport> = scenarios.iter().map(|s| checker.check(s)).collect();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}\n", render_report(report));
        }
    }
    Ok(())
}

fn render_report(report: &ScenarioReport) -> String {
    let mut lines = vec![format!(
        "Scenario {} ({}): balance {:.2}, {}",
        report.scenario_id,
        if report.name.is_empty() { "unnamed" } else { report.name.as_str() },
        report.balance_score,
        if report.is_feasible() {
            "feasible".to_string()
        } else {
            format!("{} violations", report.violations.len())
        }
    )];
    lines.extend(report.violations.iter().map(|v| format!("  - {}", v)));
    lines.join("\n")
}
