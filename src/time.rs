use crate::error::SlotError;
use chrono::{NaiveTime, Timelike};
use num::Integer;

pub const MINUTES_PER_DAY: u32 = 1440;

/// Minutes elapsed since midnight. Seconds are dropped.
///
/// # Examples
/// ```
/// use chrono::NaiveTime;
/// use overlap_libs::time::minute_of_day;
///
/// let time = NaiveTime::from_hms_opt(9, 30, 15).unwrap();
/// assert_eq!(minute_of_day(time), 570);
/// ```
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Inverse of `minute_of_day`. `None` for anything at or past midnight.
pub fn from_minute_of_day(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// Parses a wall-clock time of day.
/// Accepts `"HH:MM"` as well as the `"HH:MM:SS"` form stored by databases;
/// only hours and minutes are kept.
///
/// # Examples
/// ```
/// use chrono::NaiveTime;
/// use overlap_libs::time::parse_time_of_day;
///
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// assert_eq!(parse_time_of_day("09:00"), Ok(nine));
/// assert_eq!(parse_time_of_day("9:00:00"), Ok(nine));
/// assert!(parse_time_of_day("25:00").is_err());
/// ```
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, SlotError> {
    let invalid = || SlotError::InvalidTime {
        value: value.to_string(),
    };

    let mut parts = value.trim().split(':');
    let hour = parts.next().and_then(|h| h.parse::<u32>().ok());
    let minute = parts.next().and_then(|m| m.parse::<u32>().ok());

    // Seconds may be present but never carry meaning for a slot
    if let Some(seconds) = parts.next() {
        seconds
            .split('.')
            .next()
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|&s| s < 60)
            .ok_or_else(invalid)?;
    }
    if parts.next().is_some() {
        return Err(invalid());
    }

    match (hour, minute) {
        (Some(hour), Some(minute)) => NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Zero padded 24-hour `"HH:MM"`, the storage form of a time of day.
pub fn format_24h(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Adds `minutes` to a wall-clock time, wrapping modulo 24 hours.
/// The date is never touched, so callers wanting a date roll must
/// shift a full date-time instead.
///
/// # Examples
/// ```
/// use chrono::NaiveTime;
/// use overlap_libs::time::apply_offset;
///
/// let late = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
/// assert_eq!(apply_offset(late, 60), NaiveTime::from_hms_opt(0, 30, 0).unwrap());
/// assert_eq!(apply_offset(late, -24 * 60), late);
/// ```
pub fn apply_offset(time: NaiveTime, minutes: i32) -> NaiveTime {
    let total = i64::from(minute_of_day(time)) + i64::from(minutes);
    let wrapped = total.mod_floor(&i64::from(MINUTES_PER_DAY));

    u32::try_from(wrapped)
        .ok()
        .and_then(from_minute_of_day)
        .unwrap_or(NaiveTime::MIN)
}

#[cfg(feature = "serde")]
pub(crate) mod serde_hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_24h(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        super::parse_time_of_day(&value).map_err(serde::de::Error::custom)
    }
}
