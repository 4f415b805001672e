//! Team balance score: how evenly room visits are spread over teams

use crate::types::{Scenario, Schedule};

/// Anything with a per-team assignment count
pub trait AssignmentCounts {
    fn assignment_counts(&self) -> Vec<usize>;
}

impl AssignmentCounts for Schedule {
    fn assignment_counts(&self) -> Vec<usize> {
        self.teams.values().map(Vec::len).collect()
    }
}

impl AssignmentCounts for Scenario {
    fn assignment_counts(&self) -> Vec<usize> {
        self.teams.values().map(Vec::len).collect()
    }
}

/// Score in `[0.0, 1.0]`, 1.0 when every team has the same number of rooms.
///
/// `1 - variance / mean²` over per-team counts, clamped at 0. No teams scores
/// 0.0; teams that all have zero rooms score 1.0.
pub fn balance_score<S: AssignmentCounts + ?Sized>(schedule: &S) -> f64 {
    score_counts(&schedule.assignment_counts())
}

fn score_counts(counts: &[usize]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }

    let n = counts.len() as f64;
    let mean = counts.iter().sum::<usize>() as f64 / n;
    if mean == 0.0 {
        return 1.0;
    }

    let variance = counts
        .iter()
        .map(|&c| (c as f64 - mean).powi(2))
        .sum::<f64>()
        / n;

    (1.0 - variance / (mean * mean)).max(0.0)
}
