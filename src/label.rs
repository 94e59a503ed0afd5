use crate::heatmap::HeatmapEntry;
use crate::slot::{Granularity, Slot};
use crate::time::apply_offset;
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};
use std::fmt;

/// 12-hour clock label, e.g. `"9:00 AM"` or `"12:30 PM"`.
///
/// # Examples
/// ```
/// use chrono::NaiveTime;
/// use overlap_libs::label::format_time;
///
/// assert_eq!(format_time(NaiveTime::from_hms_opt(0, 0, 0).unwrap()), "12:00 AM");
/// assert_eq!(format_time(NaiveTime::from_hms_opt(9, 5, 0).unwrap()), "9:05 AM");
/// assert_eq!(format_time(NaiveTime::from_hms_opt(12, 30, 0).unwrap()), "12:30 PM");
/// assert_eq!(format_time(NaiveTime::from_hms_opt(23, 0, 0).unwrap()), "11:00 PM");
/// ```
pub fn format_time(time: NaiveTime) -> String {
    let hour = time.hour();
    let period = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };

    format!("{}:{:02} {}", display_hour, time.minute(), period)
}

/// `format_time` after shifting by a display offset
pub fn format_time_offset(time: NaiveTime, offset_minutes: i32) -> String {
    format_time(apply_offset(time, offset_minutes))
}

/// `"9:30 AM – 10:00 AM"` for a slot starting at `time`, shifted by `offset_minutes`
pub fn format_range(time: NaiveTime, granularity: Granularity, offset_minutes: i32) -> String {
    let start = apply_offset(time, offset_minutes);
    // granularity never exceeds a day
    let end = apply_offset(start, granularity.minutes() as i32);

    format!("{} – {}", format_time(start), format_time(end))
}

/// Column header pieces for a date
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParts {
    pub weekday: String,
    pub month: String,
    pub day: u32,
}

impl From<NaiveDate> for DateParts {
    fn from(date: NaiveDate) -> Self {
        DateParts {
            weekday: date.format("%a").to_string(),
            month: date.format("%b").to_string(),
            day: date.day(),
        }
    }
}

impl fmt::Display for DateParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.weekday, self.month, self.day)
    }
}

/// Presentation of a `Slot` in the viewer's timezone.
///
/// Built from a canonical `Slot` and never converted back: it carries the
/// shifted wall-clock values only, and deliberately offers no comparison
/// with `Slot`. The date is rolled along with the time, so a late slot
/// shifted past midnight names the following day.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySlotLabel {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl DisplaySlotLabel {
    /// # Examples
    /// ```
    /// use overlap_libs::label::DisplaySlotLabel;
    /// use overlap_libs::slot::{Granularity, Slot};
    ///
    /// let slot: Slot = "2025-01-15 23:30".parse().unwrap();
    /// let label = DisplaySlotLabel::new(&slot, Granularity::default(), 60);
    ///
    /// assert_eq!(label.range(), "12:30 AM – 1:00 AM");
    /// assert_eq!(label.date.to_string(), "2025-01-16");
    /// ```
    pub fn new(slot: &Slot, granularity: Granularity, offset_minutes: i32) -> DisplaySlotLabel {
        let canonical = slot.date().and_time(slot.time());
        let shifted = canonical
            .checked_add_signed(Duration::minutes(i64::from(offset_minutes)))
            .unwrap_or(canonical);
        let start = shifted.time();

        DisplaySlotLabel {
            date: shifted.date(),
            start,
            end: apply_offset(start, granularity.minutes() as i32),
        }
    }

    pub fn time(&self) -> String {
        format_time(self.start)
    }

    pub fn range(&self) -> String {
        format!("{} – {}", format_time(self.start), format_time(self.end))
    }

    pub fn date_parts(&self) -> DateParts {
        self.date.into()
    }
}

impl fmt::Display for DisplaySlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.date_parts(), self.range())
    }
}

/// Tooltip line for a heatmap cell, e.g. `"9:00 AM – 9:30 AM: 2/3 available"`
pub fn availability_summary(label: &DisplaySlotLabel, entry: &HeatmapEntry) -> String {
    format!(
        "{}: {}/{} available",
        label.range(),
        entry.count,
        entry.total
    )
}
