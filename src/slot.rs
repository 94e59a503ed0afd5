use crate::error::SlotError;
use crate::time::{self, MINUTES_PER_DAY};
use chrono::{NaiveDate, NaiveTime};
use itertools::Itertools;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Storage form of a slot date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One fixed-granularity interval on one date, in the meeting's authoring
/// timezone. Slots order by date, then by time of day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    date: NaiveDate,
    time: NaiveTime,
}

impl Slot {
    /// Construct a new Slot
    /// Seconds on `time` are dropped so that identity stays structural
    /// on the `"YYYY-MM-DD HH:MM"` storage form.
    ///
    /// # Examples
    /// ```
    /// use chrono::{NaiveDate, NaiveTime};
    /// use overlap_libs::slot::Slot;
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    /// let time = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
    ///
    /// let slot = Slot::new(date, time);
    /// assert_eq!(slot.to_string(), "2025-01-15 09:30");
    /// assert_eq!(slot, "2025-01-15 09:30".parse::<Slot>().unwrap());
    /// ```
    pub fn new(date: NaiveDate, time: NaiveTime) -> Slot {
        let time = time::from_minute_of_day(time::minute_of_day(time)).unwrap_or(time);
        Slot { date, time }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Wall-clock end of this slot. Wraps past midnight without a date roll.
    pub fn end(&self, granularity: Granularity) -> NaiveTime {
        // granularity never exceeds a day, so the cast is lossless
        time::apply_offset(self.time, granularity.minutes() as i32)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.date.format(DATE_FORMAT),
            time::format_24h(self.time)
        )
    }
}

impl FromStr for Slot {
    type Err = SlotError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || SlotError::InvalidSlot {
            value: value.to_string(),
        };

        let (date, time) = value.trim().split_once(' ').ok_or_else(invalid)?;
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| invalid())?;
        let time = time::parse_time_of_day(time).map_err(|_| invalid())?;

        Ok(Slot::new(date, time))
    }
}

/// Parses a `"YYYY-MM-DD"` calendar date
pub fn parse_date(value: &str) -> Result<NaiveDate, SlotError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| SlotError::InvalidDate {
        value: value.to_string(),
    })
}

#[cfg(feature = "serde")]
impl serde::Serialize for Slot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Slot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Slot {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let days = u.int_in_range(0..=3652_u64)?;
        let minute = u.int_in_range(0..=MINUTES_PER_DAY - 1)?;

        let date = NaiveDate::from_ymd_opt(2020, 1, 1)
            .and_then(|epoch| epoch.checked_add_days(chrono::Days::new(days)))
            .ok_or(arbitrary::Error::IncorrectFormat)?;
        let time = time::from_minute_of_day(minute).ok_or(arbitrary::Error::IncorrectFormat)?;

        Ok(Slot::new(date, time))
    }
}

/// Length of every slot, in minutes. At least one minute, at most a day.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Granularity(u32);

impl Granularity {
    pub fn new(minutes: u32) -> Result<Granularity, SlotError> {
        if minutes == 0 || minutes > MINUTES_PER_DAY {
            Err(SlotError::InvalidGranularity { minutes })
        } else {
            Ok(Granularity(minutes))
        }
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity(30)
    }
}

impl TryFrom<u32> for Granularity {
    type Error = SlotError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Granularity::new(minutes)
    }
}

impl From<Granularity> for u32 {
    fn from(granularity: Granularity) -> u32 {
        granularity.0
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Granularity {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Granularity(u.int_in_range(1..=MINUTES_PER_DAY)?))
    }
}

/// Times of day at which slots start within `[start, end)`.
/// Only whole slots are produced: a trailing remainder shorter than
/// `granularity` is dropped.
///
/// # Errors
/// `SlotError::InvalidRange` when `start >= end`.
pub fn slot_times(
    start: NaiveTime,
    end: NaiveTime,
    granularity: Granularity,
) -> Result<Vec<NaiveTime>, SlotError> {
    let first = time::minute_of_day(start);
    let last = time::minute_of_day(end);

    if first >= last {
        return Err(SlotError::InvalidRange { start, end });
    }

    let step = granularity.minutes();
    let per_day = (last - first) / step;

    Ok((0..per_day)
        .filter_map(|i| time::from_minute_of_day(first + i * step))
        .collect_vec())
}

pub trait Enumerate {
    fn slots(
        self,
        start: NaiveTime,
        end: NaiveTime,
        granularity: Granularity,
    ) -> Result<Vec<Slot>, SlotError>;
}

impl<'a, T> Enumerate for T
where
    T: Iterator<Item = &'a NaiveDate>,
{
    /// Self is the candidate dates of a meeting, in the order their
    /// columns should appear. Every date receives the same run of slots.
    ///
    /// # Examples
    /// ```
    /// use chrono::{NaiveDate, NaiveTime};
    /// use overlap_libs::slot::{Enumerate, Granularity};
    ///
    /// let dates = vec![NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()];
    /// let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    /// let end = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
    ///
    /// let slots = dates.iter().slots(start, end, Granularity::default()).unwrap();
    /// let slots: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
    ///
    /// assert_eq!(slots, vec!["2025-01-15 09:00", "2025-01-15 09:30"]);
    /// ```
    fn slots(
        self,
        start: NaiveTime,
        end: NaiveTime,
        granularity: Granularity,
    ) -> Result<Vec<Slot>, SlotError> {
        let times = slot_times(start, end, granularity)?;

        let slots = self
            .flat_map(|&date| times.iter().map(move |&time| Slot::new(date, time)))
            .collect_vec();

        debug!(
            "Enumerated {} slots between {} and {} every {} minutes",
            slots.len(),
            time::format_24h(start),
            time::format_24h(end),
            granularity.minutes()
        );

        Ok(slots)
    }
}

/// Ordered universe of slots for `dates` within `[start, end)`.
/// Output is grouped by date in the order `dates` are supplied.
///
/// # Errors
/// `SlotError::InvalidRange` when `start >= end`, even with no dates.
pub fn enumerate(
    dates: &[NaiveDate],
    start: NaiveTime,
    end: NaiveTime,
    granularity: Granularity,
) -> Result<Vec<Slot>, SlotError> {
    dates.iter().slots(start, end, granularity)
}
