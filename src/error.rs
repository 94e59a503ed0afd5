use chrono::NaiveTime;
use thiserror::Error;

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum SlotError {
    #[error("Invalid time range: start {start} must be before end {end}")]
    InvalidRange { start: NaiveTime, end: NaiveTime },
    #[error("Unsupported granularity of {minutes} minutes. Expected between 1 and 1440")]
    InvalidGranularity { minutes: u32 },
    #[error("Could not parse time of day from {value:?}")]
    InvalidTime { value: String },
    #[error("Could not parse date from {value:?}")]
    InvalidDate { value: String },
    #[error("Could not parse slot from {value:?}. Expected \"YYYY-MM-DD HH:MM\"")]
    InvalidSlot { value: String },
    #[error("Unknown timezone {timezone:?}")]
    UnresolvableTimezone { timezone: String },
    #[error("Meeting {id:?} not found")]
    MeetingNotFound { id: String },
}
