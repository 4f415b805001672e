//! CSV import of reservations and participants
//!
//! Both files use Korean column headers. Every bad row is reported, not just
//! the first one: the import fails once with the full list.

use std::collections::HashMap;
use std::io::Read;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::types::{parse_timestamp, Capacity, HorrorRole, ModelError, Participant, Reservation};

const RESERVATION_COLUMNS: [&str; 8] = [
    "방이름", "시작시간", "종료시간", "주소", "테마", "최소인원", "적정인원", "최대인원",
];

const PARTICIPANT_COLUMNS: [&str; 4] = ["이름", "참여시작시간", "참여종료시간", "공포포지션"];

/// Column name -> index, failing with every missing name
fn column_index(headers: &csv::StringRecord, required: &[&str]) -> Result<HashMap<String, usize>> {
    let index: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().trim_start_matches('\u{feff}').to_string(), i))
        .collect();

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|c| !index.contains_key(*c))
        .collect();
    if !missing.is_empty() {
        bail!("Missing required columns: {}", missing.join(", "));
    }

    Ok(index)
}

struct Row<'r> {
    record: &'r csv::StringRecord,
    index: &'r HashMap<String, usize>,
}

impl Row<'_> {
    fn text(&self, column: &str) -> &str {
        self.index
            .get(column)
            .and_then(|&i| self.record.get(i))
            .map(str::trim)
            .unwrap_or("")
    }

    fn number(&self, column: &str) -> Result<i64, String> {
        let raw = self.text(column);
        raw.parse()
            .map_err(|_| format!("{} must be a whole number (got '{}')", column, raw))
    }
}

fn read_rows<R, T>(
    reader: R,
    required: &[&str],
    what: &str,
    mut parse: impl FnMut(&Row<'_>) -> Result<T, String>,
) -> Result<Vec<T>>
where
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .with_context(|| format!("Failed to read {} CSV header", what))?
        .clone();
    if headers.is_empty() {
        bail!("{} CSV file is empty", what);
    }
    let index = column_index(&headers, required)?;

    let mut items = Vec::new();
    let mut errors = Vec::new();

    for (i, record) in csv_reader.records().enumerate() {
        // Header is line 1
        let line = i + 2;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                errors.push(format!("row {}: {}", line, e));
                continue;
            }
        };

        match parse(&Row { record: &record, index: &index }) {
            Ok(item) => items.push(item),
            Err(e) => errors.push(format!("row {}: {}", line, e)),
        }
    }

    if !errors.is_empty() {
        bail!("Invalid {} data:\n{}", what, errors.join("\n"));
    }

    info!("Imported {} {} rows", items.len(), what);
    Ok(items)
}

/// Parse the reservations CSV
pub fn parse_reservations<R: Read>(reader: R) -> Result<Vec<Reservation>> {
    read_rows(reader, &RESERVATION_COLUMNS, "reservation", |row| {
        let capacity = Capacity::new(
            row.number("최소인원")?,
            row.number("적정인원")?,
            row.number("최대인원")?,
        )
        .map_err(|e| e.to_string())?;

        Reservation::new(
            row.text("방이름"),
            timestamp(row.text("시작시간"))?,
            timestamp(row.text("종료시간"))?,
            row.text("주소"),
            row.text("테마"),
            capacity,
        )
        .map_err(|e| e.to_string())
    })
}

/// Parse the participants CSV
pub fn parse_participants<R: Read>(reader: R) -> Result<Vec<Participant>> {
    read_rows(reader, &PARTICIPANT_COLUMNS, "participant", |row| {
        let role: HorrorRole = row.text("공포포지션").parse().map_err(|e: ModelError| e.to_string())?;

        Participant::new(
            row.text("이름"),
            timestamp(row.text("참여시작시간"))?,
            timestamp(row.text("참여종료시간"))?,
            role,
        )
        .map_err(|e| e.to_string())
    })
}

fn timestamp(value: &str) -> Result<chrono::NaiveDateTime, String> {
    parse_timestamp(value).map_err(|e| e.to_string())
}
