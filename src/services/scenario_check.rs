//! Check an optimizer scenario against the real reservations and roster
//!
//! Resolves every assignment to its [`Reservation`] and [`Participant`]s and
//! runs the constraint predicates over the result. Partially populated
//! scenarios are fine: unknown rooms or names become violations, missing
//! optional fields take their defaults.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::balance::balance_score;
use super::validator::{
    is_capacity_valid, is_participant_available, is_travel_feasible, needs_hazard_tank,
};
use crate::types::{
    parse_timestamp, Participant, Reservation, Scenario, ScenarioAssignment, Schedule,
    TeamAssignment, TravelTimeMatrix, TIMESTAMP_FORMAT,
};

/// What is wrong with one assignment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViolationKind {
    UnknownReservation {
        room_name: String,
        start_time: String,
    },
    UnknownParticipant {
        name: String,
    },
    ParticipantUnavailable {
        name: String,
    },
    CapacityOutOfRange {
        member_count: usize,
        min: u32,
        max: u32,
    },
    MemberCountMismatch {
        declared: u32,
        listed: usize,
    },
    TravelInfeasible {
        travel_minutes: u32,
        gap_minutes: i64,
    },
    /// Room found, but its only slot starts at another time than planned
    StartTimeMismatch {
        planned: String,
        scheduled: String,
    },
    MissingTank,
}

/// A violation located by team label and position within the team (0-based)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub team: String,
    pub position: usize,
    pub room_name: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team {} #{} ({}): ", self.team, self.position + 1, self.room_name)?;
        match &self.kind {
            ViolationKind::UnknownReservation { room_name, start_time } => {
                write!(f, "no reservation for '{}' at '{}'", room_name, start_time)
            }
            ViolationKind::UnknownParticipant { name } => write!(f, "unknown participant '{}'", name),
            ViolationKind::ParticipantUnavailable { name } => {
                write!(f, "{} is not available for the whole slot", name)
            }
            ViolationKind::CapacityOutOfRange { member_count, min, max } => write!(
                f,
                "{} members outside capacity {}-{} (±1)",
                member_count, min, max
            ),
            ViolationKind::MemberCountMismatch { declared, listed } => write!(
                f,
                "member_count says {} but {} members are listed",
                declared, listed
            ),
            ViolationKind::TravelInfeasible { travel_minutes, gap_minutes } => write!(
                f,
                "{} min gap is shorter than {} min travel",
                gap_minutes, travel_minutes
            ),
            ViolationKind::StartTimeMismatch { planned, scheduled } => write!(
                f,
                "planned start '{}' but the room starts at {}",
                planned, scheduled
            ),
            ViolationKind::MissingTank => write!(f, "horror theme without a tank"),
        }
    }
}

/// Outcome of checking one scenario
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub scenario_id: u32,
    pub name: String,
    pub balance_score: f64,
    pub violations: Vec<Violation>,
    /// Assignments that resolved to a reservation
    #[serde(skip)]
    pub schedule: Schedule,
}

impl ScenarioReport {
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }
}

pub struct ScenarioChecker<'a> {
    reservations: &'a [Reservation],
    participants: HashMap<&'a str, &'a Participant>,
    travel: Option<&'a TravelTimeMatrix>,
    flexible_capacity: bool,
}

impl<'a> ScenarioChecker<'a> {
    pub fn new(reservations: &'a [Reservation], participants: &'a [Participant]) -> Self {
        Self {
            reservations,
            participants: participants.iter().map(|p| (p.name(), p)).collect(),
            travel: None,
            flexible_capacity: true,
        }
    }

    /// Take travel minutes from `matrix` instead of the scenario's own numbers
    /// wherever both addresses are in it
    pub fn with_travel_matrix(mut self, matrix: &'a TravelTimeMatrix) -> Self {
        self.travel = Some(matrix);
        self
    }

    pub fn strict_capacity(mut self) -> Self {
        self.flexible_capacity = false;
        self
    }

    pub fn check(&self, scenario: &Scenario) -> ScenarioReport {
        let mut violations = Vec::new();
        let mut schedule = Schedule {
            scenario_id: scenario.scenario_id,
            ..Default::default()
        };

        let team_ids = team_ids(scenario);
        for label in scenario.sorted_team_ids() {
            let team_id = team_ids[label];
            let mut resolved: Vec<TeamAssignment> = Vec::new();

            for (position, planned) in scenario.teams[label].iter().enumerate() {
                let mut report = |kind: ViolationKind| {
                    violations.push(Violation {
                        team: label.to_string(),
                        position,
                        room_name: planned.room_name.clone(),
                        kind,
                    })
                };

                let Some(reservation) = self.find_reservation(planned) else {
                    report(ViolationKind::UnknownReservation {
                        room_name: planned.room_name.clone(),
                        start_time: planned.start_time.clone(),
                    });
                    continue;
                };

                let planned_start = planned.start_time.trim();
                if !planned_start.is_empty() && !starts_at(reservation, planned_start) {
                    report(ViolationKind::StartTimeMismatch {
                        planned: planned_start.to_string(),
                        scheduled: reservation.start().format(TIMESTAMP_FORMAT).to_string(),
                    });
                }

                let mut members = Vec::with_capacity(planned.members.len());
                for name in &planned.members {
                    match self.participants.get(name.trim()) {
                        Some(p) => members.push((*p).clone()),
                        None => report(ViolationKind::UnknownParticipant { name: name.clone() }),
                    }
                }

                if let Some(declared) = planned.member_count {
                    if !planned.members.is_empty() && declared as usize != planned.members.len() {
                        report(ViolationKind::MemberCountMismatch {
                            declared,
                            listed: planned.members.len(),
                        });
                    }
                }

                let assignment = TeamAssignment {
                    team_id,
                    reservation: reservation.clone(),
                    members,
                    travel_time_from_previous: planned.travel_minutes(),
                };

                for kind in self.check_assignment(&assignment, planned, resolved.last()) {
                    report(kind);
                }
                resolved.push(assignment);
            }

            schedule.teams.insert(team_id, resolved);
        }

        let balance = balance_score(scenario);
        schedule.scores.insert("balance".to_string(), balance);

        debug!(
            "Scenario {} checked: {} violations, balance {:.3}",
            scenario.scenario_id,
            violations.len(),
            balance
        );

        ScenarioReport {
            scenario_id: scenario.scenario_id,
            name: scenario.name.clone(),
            balance_score: balance,
            violations,
            schedule,
        }
    }

    fn check_assignment(
        &self,
        assignment: &TeamAssignment,
        planned: &ScenarioAssignment,
        previous: Option<&TeamAssignment>,
    ) -> Vec<ViolationKind> {
        let mut found = Vec::new();
        let reservation = &assignment.reservation;

        for member in &assignment.members {
            if !is_participant_available(member, reservation.start(), reservation.end()) {
                found.push(ViolationKind::ParticipantUnavailable {
                    name: member.name().to_string(),
                });
            }
        }

        let member_count = if planned.members.is_empty() {
            planned.effective_member_count()
        } else {
            planned.members.len()
        };
        if !is_capacity_valid(reservation, member_count, self.flexible_capacity) {
            let capacity = reservation.capacity();
            found.push(ViolationKind::CapacityOutOfRange {
                member_count,
                min: capacity.min,
                max: capacity.max,
            });
        }

        if let Some(previous) = previous {
            let travel_minutes = self
                .travel
                .and_then(|m| {
                    m.minutes(previous.reservation.address(), reservation.address())
                })
                .unwrap_or(assignment.travel_time_from_previous);

            if !is_travel_feasible(&previous.reservation, reservation, travel_minutes) {
                found.push(ViolationKind::TravelInfeasible {
                    travel_minutes,
                    gap_minutes: (reservation.start() - previous.reservation.end()).num_minutes(),
                });
            }
        }

        if needs_hazard_tank(reservation) && !assignment.has_protective_member() {
            found.push(ViolationKind::MissingTank);
        }

        found
    }

    /// Reservation named by `planned`: same room, and the same start when the
    /// room has several slots. A room with a single slot matches by name alone;
    /// `check` flags a differing start separately.
    fn find_reservation(&self, planned: &ScenarioAssignment) -> Option<&'a Reservation> {
        let room = planned.room_name.trim();
        let candidates: Vec<&'a Reservation> = self
            .reservations
            .iter()
            .filter(|r| r.room_name() == room)
            .collect();

        let start = planned.start_time.trim();
        let by_start = candidates.iter().copied().find(|r| starts_at(r, start));

        match (by_start, candidates.as_slice()) {
            (Some(r), _) => Some(r),
            (None, [only]) => Some(*only),
            _ => None,
        }
    }
}

/// Whether `reservation` starts at `start`, given as a full timestamp or `HH:MM`
fn starts_at(reservation: &Reservation, start: &str) -> bool {
    match parse_timestamp(start) {
        Ok(ts) => reservation.start() == ts,
        Err(_) => reservation.start().format("%H:%M").to_string() == start,
    }
}

/// Numeric team labels keep their number, the first label claiming it wins.
/// Non-numeric labels and labels whose number is taken ("01" after "1") get
/// the first free id after the largest numeric one, wrapping past `u32::MAX`.
fn team_ids(scenario: &Scenario) -> BTreeMap<&str, u32> {
    let labels = scenario.sorted_team_ids();
    let mut ids = BTreeMap::new();
    let mut used = HashSet::new();

    let mut unnumbered = Vec::new();
    for label in labels {
        match label.parse::<u32>() {
            Ok(id) if used.insert(id) => {
                ids.insert(label, id);
            }
            _ => unnumbered.push(label),
        }
    }

    let mut next = used.iter().max().map_or(1, |max| max.wrapping_add(1));
    for label in unnumbered {
        while used.contains(&next) {
            next = next.wrapping_add(1);
        }
        used.insert(next);
        ids.insert(label, next);
    }
    ids
}
