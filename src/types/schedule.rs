//! Resolved schedule: teams of participants assigned to reservations

use std::collections::BTreeMap;

use super::participant::Participant;
use super::reservation::Reservation;

/// One team visiting one reservation
#[derive(Debug, Clone, PartialEq)]
pub struct TeamAssignment {
    pub team_id: u32,
    pub reservation: Reservation,
    pub members: Vec<Participant>,
    /// Minutes of travel from the team's previous room, 0 for the first one
    pub travel_time_from_previous: u32,
}

impl TeamAssignment {
    pub fn has_protective_member(&self) -> bool {
        self.members.iter().any(|m| m.role().is_protective())
    }
}

/// A full candidate schedule, produced outside this crate and only inspected here
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    pub scenario_id: u32,
    /// team id -> assignments in visiting order
    pub teams: BTreeMap<u32, Vec<TeamAssignment>>,
    /// Named scores (balance, ...)
    pub scores: BTreeMap<String, f64>,
    pub notes: String,
}
