//! Schedule constraint predicates
//!
//! Independent, side-effect free checks over a proposed assignment. They don't
//! build or repair schedules, they only say whether one piece of it is legal.

use chrono::NaiveDateTime;

use crate::types::{Participant, Reservation};

/// Theme marker for horror rooms that need a tank in the team
pub const HAZARD_THEME_MARKER: &str = "공포";

/// Slack allowed around the room capacity in flexible mode
pub const CAPACITY_FLEX: i64 = 1;

/// `true` iff the participant is around for the whole `[start, end]` slot
/// (both ends inclusive)
pub fn is_participant_available(
    participant: &Participant,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> bool {
    participant.available_from() <= start && participant.available_until() >= end
}

/// `true` iff `member_count` fits the room. Flexible mode widens the range by
/// one person on each side.
pub fn is_capacity_valid(reservation: &Reservation, member_count: usize, flexible: bool) -> bool {
    let capacity = reservation.capacity();
    let count = member_count as i64;
    let (min, max) = (capacity.min as i64, capacity.max as i64);

    if flexible {
        min - CAPACITY_FLEX <= count && count <= max + CAPACITY_FLEX
    } else {
        min <= count && count <= max
    }
}

/// `true` iff the gap between `previous` ending and `next` starting covers
/// `travel_minutes`. A negative gap is never feasible.
pub fn is_travel_feasible(previous: &Reservation, next: &Reservation, travel_minutes: u32) -> bool {
    let gap_minutes = (next.start() - previous.end()).num_seconds() as f64 / 60.0;
    gap_minutes >= travel_minutes as f64
}

/// `true` iff the room's theme marks it as horror, so the team assigned to it
/// should include at least one protective (tank) participant
pub fn needs_hazard_tank(reservation: &Reservation) -> bool {
    reservation.theme().to_lowercase().contains(HAZARD_THEME_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{parse_timestamp, Capacity, HorrorRole};
    use chrono::Duration;

    fn ts(value: &str) -> NaiveDateTime {
        parse_timestamp(value).unwrap()
    }

    fn reservation(start: &str, end: &str, theme: &str, min: i64, max: i64) -> Reservation {
        Reservation::new(
            "방",
            ts(start),
            ts(end),
            "서울 강남구 테헤란로 123",
            theme,
            Capacity::new(min, min, max).unwrap(),
        )
        .unwrap()
    }

    fn participant(from: &str, until: &str) -> Participant {
        Participant::new("김철수", ts(from), ts(until), HorrorRole::Civilian).unwrap()
    }

    #[test]
    fn test_available_inclusive_bounds() {
        let p = participant("2026-02-15 14:00", "2026-02-15 20:00");

        assert!(is_participant_available(&p, ts("2026-02-15 14:00"), ts("2026-02-15 20:00")));
        assert!(is_participant_available(&p, ts("2026-02-15 15:00"), ts("2026-02-15 17:00")));
    }

    #[test]
    fn test_unavailable_when_slot_overhangs() {
        let p = participant("2026-02-15 14:00", "2026-02-15 20:00");

        assert!(!is_participant_available(&p, ts("2026-02-15 13:59"), ts("2026-02-15 16:00")));
        assert!(!is_participant_available(&p, ts("2026-02-15 18:30"), ts("2026-02-15 20:01")));
    }

    #[test]
    fn test_capacity_flexible_band() {
        let r = reservation("2026-02-15 14:00", "2026-02-15 16:00", "추리", 2, 5);

        for m in 1..=6 {
            assert!(is_capacity_valid(&r, m, true), "{} should fit flexibly", m);
        }
        assert!(!is_capacity_valid(&r, 0, true));
        assert!(!is_capacity_valid(&r, 7, true));
    }

    #[test]
    fn test_capacity_flexible_band_larger_room() {
        let r = reservation("2026-02-15 14:00", "2026-02-15 16:00", "추리", 4, 6);

        for m in 3..=7 {
            assert!(is_capacity_valid(&r, m, true));
        }
        assert!(!is_capacity_valid(&r, 2, true));
        assert!(!is_capacity_valid(&r, 8, true));
    }

    #[test]
    fn test_capacity_strict() {
        let r = reservation("2026-02-15 14:00", "2026-02-15 16:00", "추리", 2, 5);

        assert!(!is_capacity_valid(&r, 1, false));
        assert!(is_capacity_valid(&r, 2, false));
        assert!(is_capacity_valid(&r, 5, false));
        assert!(!is_capacity_valid(&r, 6, false));
    }

    #[test]
    fn test_capacity_single_person_room_accepts_zero_flexibly() {
        let r = reservation("2026-02-15 14:00", "2026-02-15 16:00", "추리", 1, 2);
        assert!(is_capacity_valid(&r, 0, true));
        assert!(!is_capacity_valid(&r, 0, false));
    }

    #[test]
    fn test_travel_feasibility_boundaries() {
        let previous = reservation("2026-02-15 14:00", "2026-02-15 16:00", "추리", 2, 4);
        let t = previous.end();
        let next_at = |offset: i64| {
            Reservation::new(
                "다음 방",
                t + Duration::minutes(offset),
                t + Duration::minutes(offset + 60),
                "서울 마포구 홍익로 456",
                "추리",
                Capacity::new(2, 3, 4).unwrap(),
            )
            .unwrap()
        };

        assert!(is_travel_feasible(&previous, &next_at(15), 15));
        assert!(!is_travel_feasible(&previous, &next_at(14), 15));
        assert!(!is_travel_feasible(&previous, &next_at(0), 15));
        assert!(is_travel_feasible(&previous, &next_at(0), 0));
    }

    #[test]
    fn test_travel_overlap_is_infeasible() {
        let previous = reservation("2026-02-15 14:00", "2026-02-15 16:00", "추리", 2, 4);
        let next = reservation("2026-02-15 15:30", "2026-02-15 17:00", "추리", 2, 4);

        assert!(!is_travel_feasible(&previous, &next, 0));
    }

    #[test]
    fn test_needs_hazard_tank() {
        let horror = reservation("2026-02-15 16:30", "2026-02-15 18:30", "공포의 지하실", 2, 4);
        let mystery = reservation("2026-02-15 14:00", "2026-02-15 16:00", "추리", 2, 4);
        let mixed = reservation("2026-02-15 14:00", "2026-02-15 16:00", "Horror 공포/추리", 2, 4);

        assert!(needs_hazard_tank(&horror));
        assert!(!needs_hazard_tank(&mystery));
        assert!(needs_hazard_tank(&mixed));
    }
}
