//! `context` command: print the text block handed to the external optimizer

use std::path::Path;

use anyhow::Result;

use super::{build_travel_matrix, load_participants, load_reservations};
use crate::config::Config;
use crate::types::{roster_text, Participant, Reservation, TravelTimeMatrix};

pub async fn run(config: &Config, reservations: &Path, participants: &Path) -> Result<()> {
    let reservations = load_reservations(reservations)?;
    let participants = load_participants(participants)?;
    let matrix = build_travel_matrix(config, &reservations).await;

    println!("{}", render_context(&reservations, &participants, &matrix));
    Ok(())
}

fn render_context(
    reservations: &[Reservation],
    participants: &[Participant],
    matrix: &TravelTimeMatrix,
) -> String {
    let mut sections = Vec::with_capacity(3);

    let mut rooms = vec![format!("예약 정보 ({}개):", reservations.len())];
    rooms.extend(reservations.iter().map(|r| format!("- {}", r.summary_line())));
    sections.push(rooms.join("\n"));

    sections.push(roster_text(participants));
    sections.push(matrix.render_text());
    sections.join("\n\n")
}
