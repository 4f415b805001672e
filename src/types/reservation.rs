use chrono::NaiveDateTime;
use serde::Serialize;

use super::error::ModelError;
use super::travel::Address;

/// Timestamp format used by the input sheets
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a `YYYY-MM-DD HH:MM` timestamp
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ModelError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| ModelError::InvalidTimestamp(value.to_string()))
}

/// Participant-count bounds of a room, `min <= optimal <= max`, all positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capacity {
    pub min: u32,
    pub optimal: u32,
    pub max: u32,
}

impl Capacity {
    pub fn new(min: i64, optimal: i64, max: i64) -> Result<Self, ModelError> {
        let min = positive("min_capacity", min)?;
        let optimal = positive("optimal_capacity", optimal)?;
        let max = positive("max_capacity", max)?;

        if min > optimal || optimal > max {
            return Err(ModelError::CapacityOrder { min, optimal, max });
        }

        Ok(Self { min, optimal, max })
    }
}

fn positive(field: &'static str, value: i64) -> Result<u32, ModelError> {
    if value <= 0 || value > u32::MAX as i64 {
        return Err(ModelError::NonPositiveCapacity { field, value });
    }
    Ok(value as u32)
}

/// A bookable escape room slot at a fixed address
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    room_name: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    address: Address,
    theme: String,
    capacity: Capacity,
}

impl Reservation {
    pub fn new(
        room_name: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        address: impl Into<Address>,
        theme: impl Into<String>,
        capacity: Capacity,
    ) -> Result<Self, ModelError> {
        if end <= start {
            return Err(ModelError::EndNotAfterStart { start, end });
        }

        Ok(Self {
            room_name: room_name.into(),
            start,
            end,
            address: address.into(),
            theme: theme.into(),
            capacity,
        })
    }

    pub fn room_name(&self) -> &str {
        &self.room_name
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// One-line summary for the optimizer prompt
    pub fn summary_line(&self) -> String {
        format!(
            "{} | {}-{} | {} | {} | 인원: {}-{}-{}명",
            self.room_name,
            self.start.format("%H:%M"),
            self.end.format("%H:%M"),
            self.address,
            self.theme,
            self.capacity.min,
            self.capacity.optimal,
            self.capacity.max,
        )
    }
}

/// Distinct addresses referenced by `reservations`, first occurrence first
pub fn distinct_addresses(reservations: &[Reservation]) -> Vec<Address> {
    let mut seen = std::collections::HashSet::new();
    reservations
        .iter()
        .filter(|r| seen.insert(r.address.as_str()))
        .map(|r| r.address.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(value: &str) -> NaiveDateTime {
        parse_timestamp(value).unwrap()
    }

    fn capacity() -> Capacity {
        Capacity::new(2, 4, 5).unwrap()
    }

    #[test]
    fn test_reservation_rejects_end_before_start() {
        let result = Reservation::new(
            "미스터리 하우스",
            ts("2026-02-15 16:00"),
            ts("2026-02-15 14:00"),
            "서울 강남구 테헤란로 123",
            "추리",
            capacity(),
        );
        assert!(matches!(result, Err(ModelError::EndNotAfterStart { .. })));
    }

    #[test]
    fn test_reservation_rejects_zero_length_slot() {
        let start = ts("2026-02-15 14:00");
        let result = Reservation::new("방", start, start, "주소", "추리", capacity());
        assert!(result.is_err());
    }

    #[test]
    fn test_capacity_rejects_non_positive() {
        assert_eq!(
            Capacity::new(0, 3, 4),
            Err(ModelError::NonPositiveCapacity { field: "min_capacity", value: 0 })
        );
        assert!(Capacity::new(2, -1, 4).is_err());
    }

    #[test]
    fn test_capacity_rejects_min_above_max() {
        assert!(matches!(
            Capacity::new(5, 5, 4),
            Err(ModelError::CapacityOrder { .. })
        ));
        assert!(Capacity::new(2, 5, 4).is_err());
    }

    #[test]
    fn test_parse_timestamp_rejects_other_formats() {
        assert!(parse_timestamp("2026/02/15 14:00").is_err());
        assert!(parse_timestamp(" 2026-02-15 14:00 ").is_ok());
    }

    #[test]
    fn test_distinct_addresses_keeps_first_occurrence() {
        let make = |addr: &str| {
            Reservation::new(
                "방",
                ts("2026-02-15 14:00"),
                ts("2026-02-15 15:00"),
                addr,
                "추리",
                capacity(),
            )
            .unwrap()
        };
        let reservations = vec![make("B"), make("A"), make("B")];
        assert_eq!(distinct_addresses(&reservations), vec!["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn test_summary_line() {
        let r = Reservation::new(
            "미스터리 하우스",
            ts("2026-02-15 14:00"),
            ts("2026-02-15 16:00"),
            "서울 강남구 테헤란로 123",
            "추리",
            capacity(),
        )
        .unwrap();
        assert_eq!(
            r.summary_line(),
            "미스터리 하우스 | 14:00-16:00 | 서울 강남구 테헤란로 123 | 추리 | 인원: 2-4-5명"
        );
    }
}
