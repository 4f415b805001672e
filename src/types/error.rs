use chrono::NaiveDateTime;
use thiserror::Error;

/// Rejected model construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("end time {end} must be after start time {start}")]
    EndNotAfterStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("{field} must be positive (got {value})")]
    NonPositiveCapacity { field: &'static str, value: i64 },

    #[error("capacity bounds must satisfy min <= optimal <= max (got {min}-{optimal}-{max})")]
    CapacityOrder { min: u32, optimal: u32, max: u32 },

    #[error("available until {until} is before available from {from}")]
    AvailabilityReversed {
        from: NaiveDateTime,
        until: NaiveDateTime,
    },

    #[error("unknown horror position '{0}' (expected one of 탱커, 평민, 쫄)")]
    UnknownRole(String),

    #[error("invalid timestamp '{0}' (expected YYYY-MM-DD HH:MM)")]
    InvalidTimestamp(String),
}
