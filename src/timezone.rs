use crate::error::SlotError;
use chrono::{DateTime, Offset, Utc};
use chrono_tz::Tz;
use log::warn;

/// IANA identifiers offered in a timezone picker, with a readable label
pub const COMMON_TIMEZONES: &[(&str, &str)] = &[
    ("Pacific/Honolulu", "Hawaii (UTC-10)"),
    ("America/Anchorage", "Alaska (UTC-9)"),
    ("America/Los_Angeles", "Pacific Time, US & Canada (UTC-8/-7)"),
    ("America/Denver", "Mountain Time, US & Canada (UTC-7/-6)"),
    ("America/Chicago", "Central Time, US & Canada (UTC-6/-5)"),
    ("America/New_York", "Eastern Time, US & Canada (UTC-5/-4)"),
    ("America/Halifax", "Atlantic Time, Canada (UTC-4/-3)"),
    ("America/Sao_Paulo", "São Paulo (UTC-3)"),
    ("Atlantic/Azores", "Azores (UTC-1)"),
    ("UTC", "UTC (UTC+0)"),
    ("Europe/London", "London (UTC+0/+1)"),
    ("Europe/Paris", "Paris / Berlin / Rome (UTC+1/+2)"),
    ("Europe/Helsinki", "Helsinki / Athens (UTC+2/+3)"),
    ("Europe/Moscow", "Moscow (UTC+3)"),
    ("Asia/Dubai", "Dubai (UTC+4)"),
    ("Asia/Karachi", "Karachi / Islamabad (UTC+5)"),
    ("Asia/Kolkata", "India, Mumbai / Delhi (UTC+5:30)"),
    ("Asia/Dhaka", "Dhaka (UTC+6)"),
    ("Asia/Bangkok", "Bangkok / Jakarta (UTC+7)"),
    ("Asia/Singapore", "Singapore / Beijing (UTC+8)"),
    ("Asia/Tokyo", "Tokyo / Seoul (UTC+9)"),
    ("Australia/Sydney", "Sydney / Melbourne (UTC+10/+11)"),
    ("Pacific/Auckland", "Auckland (UTC+12/+13)"),
];

/// Looks up an IANA timezone id.
///
/// # Errors
/// `SlotError::UnresolvableTimezone` for ids missing from the tz database.
pub fn resolve(timezone: &str) -> Result<Tz, SlotError> {
    timezone
        .trim()
        .parse::<Tz>()
        .map_err(|_| SlotError::UnresolvableTimezone {
            timezone: timezone.to_string(),
        })
}

/// Offset from UTC of `timezone` at `at`, in minutes. UTC+2 is 120, UTC-5 is -300.
pub fn utc_offset_minutes(timezone: &Tz, at: DateTime<Utc>) -> i32 {
    at.with_timezone(timezone).offset().fix().local_minus_utc() / 60
}

/// Minutes to add to a time in `from` to read it in `to` at the instant `at`.
/// An unknown timezone on either side yields 0, rendering in the meeting's
/// own timezone.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use overlap_libs::timezone::offset_minutes;
///
/// let winter = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
///
/// assert_eq!(offset_minutes("America/New_York", "Europe/Paris", winter), 360);
/// assert_eq!(offset_minutes("Asia/Tokyo", "Asia/Tokyo", winter), 0);
/// assert_eq!(offset_minutes("Mars/Olympus_Mons", "Europe/Paris", winter), 0);
/// ```
pub fn offset_minutes(from: &str, to: &str, at: DateTime<Utc>) -> i32 {
    if from == to {
        return 0;
    }

    match (resolve(from), resolve(to)) {
        (Ok(from), Ok(to)) => utc_offset_minutes(&to, at) - utc_offset_minutes(&from, at),
        (Err(e), _) | (_, Err(e)) => {
            warn!("{}, keeping labels in the authoring timezone", e);
            0
        }
    }
}

/// `offset_minutes` at the current instant
pub fn offset_minutes_now(from: &str, to: &str) -> i32 {
    offset_minutes(from, to, Utc::now())
}
