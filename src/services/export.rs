//! Flattened row-per-assignment export of a scenario

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::Scenario;

/// One assignment as a spreadsheet row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "팀")]
    pub team: String,
    #[serde(rename = "시작")]
    pub start: String,
    #[serde(rename = "종료")]
    pub end: String,
    #[serde(rename = "방이름")]
    pub room: String,
    #[serde(rename = "테마")]
    pub theme: String,
    #[serde(rename = "참여자")]
    pub members: String,
    #[serde(rename = "인원")]
    pub member_count: usize,
    #[serde(rename = "이동시간")]
    pub travel_minutes: u32,
    #[serde(rename = "메모")]
    pub notes: String,
}

/// Rows ordered by team (numeric labels first), then visiting order
pub fn export_rows(scenario: &Scenario) -> Vec<ExportRow> {
    scenario
        .sorted_team_ids()
        .into_iter()
        .flat_map(move |team| {
            scenario.teams[team].iter().map(move |a| ExportRow {
                team: format!("팀 {}", team),
                start: a.start_time.clone(),
                end: a.end_time.clone(),
                room: a.room_name.clone(),
                theme: a.theme.clone(),
                members: a.members.join(", "),
                member_count: a.effective_member_count(),
                travel_minutes: a.travel_minutes(),
                notes: a.notes().to_string(),
            })
        })
        .collect()
}

/// Write `rows` as CSV with a header line
pub fn write_csv<W: Write>(rows: &[ExportRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer
            .serialize(row)
            .context("Failed to write export row")?;
    }
    csv_writer.flush().context("Failed to flush export")?;
    Ok(())
}
