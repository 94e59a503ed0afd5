use crate::error::SlotError;
use crate::label::{format_time_offset, DateParts};
use crate::slot::{self, Enumerate, Granularity, Slot};
use crate::time;
use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use itertools::Itertools;

fn default_timezone() -> String {
    "UTC".to_string()
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, rename = "meetingUrl"))]
    pub link: Option<String>,
    pub dates: Vec<NaiveDate>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "startTime", with = "crate::time::serde_hhmm")
    )]
    pub start_time: NaiveTime,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "endTime", with = "crate::time::serde_hhmm")
    )]
    pub end_time: NaiveTime,
    /// Authoring timezone all times of day are read in
    #[cfg_attr(feature = "serde", serde(default = "default_timezone"))]
    pub timezone: String,
}

impl Meeting {
    /// Constructs a new Meeting authored in UTC.
    ///
    /// # Errors
    /// `SlotError::InvalidRange` unless `start_time < end_time`.
    pub fn new(
        id: &str,
        title: &str,
        dates: Vec<NaiveDate>,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Meeting, SlotError> {
        let meeting = Meeting {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            link: None,
            dates,
            start_time,
            end_time,
            timezone: default_timezone(),
        };
        meeting.validate()?;
        Ok(meeting)
    }

    pub fn with_description(mut self, description: &str) -> Meeting {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_link(mut self, link: &str) -> Meeting {
        self.link = Some(link.to_string());
        self
    }

    pub fn with_timezone(mut self, timezone: &str) -> Meeting {
        self.timezone = timezone.to_string();
        self
    }

    /// Records loaded from storage skip `new`, so check them before use
    pub fn validate(&self) -> Result<(), SlotError> {
        if self.start_time >= self.end_time {
            Err(SlotError::InvalidRange {
                start: self.start_time,
                end: self.end_time,
            })
        } else {
            Ok(())
        }
    }

    /// Candidate dates, sorted and without repeats
    pub fn sorted_dates(&self) -> Vec<NaiveDate> {
        self.dates.iter().copied().sorted().dedup().collect()
    }

    /// Every slot of this meeting, ordered by date then time
    pub fn universe(&self, granularity: Granularity) -> Result<Vec<Slot>, SlotError> {
        self.sorted_dates()
            .iter()
            .slots(self.start_time, self.end_time, granularity)
    }

    /// Grid of whole weeks covering the meeting dates, with row labels
    /// shifted by `offset_minutes`.
    pub fn layout(
        &self,
        granularity: Granularity,
        week_start: Weekday,
        offset_minutes: i32,
    ) -> Result<GridLayout, SlotError> {
        let times = slot::slot_times(self.start_time, self.end_time, granularity)?;
        let dates = self.sorted_dates();
        // Bottom grid line closes the last whole slot, which may stop short of end_time
        let closing = times
            .last()
            .map(|&last| time::apply_offset(last, granularity.minutes() as i32))
            .unwrap_or(self.start_time);
        let end_label = format_time_offset(closing, offset_minutes);

        let (first, last) = match (dates.first(), dates.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => {
                return Ok(GridLayout {
                    columns: vec![],
                    rows: vec![],
                    end_label,
                })
            }
        };

        let from = first
            .checked_sub_days(Days::new(days_since(first.weekday(), week_start)))
            .unwrap_or(first);
        let to = last
            .checked_add_days(Days::new(6 - days_since(last.weekday(), week_start)))
            .unwrap_or(last);

        let columns = from
            .iter_days()
            .take_while(|date| *date <= to)
            .map(|date| GridColumn {
                date,
                active: dates.binary_search(&date).is_ok(),
                header: date.into(),
            })
            .collect_vec();

        let rows = times
            .into_iter()
            .map(|time| GridRow {
                time,
                label: format_time_offset(time, offset_minutes),
            })
            .collect_vec();

        Ok(GridLayout {
            columns,
            rows,
            end_label,
        })
    }
}

fn days_since(day: Weekday, week_start: Weekday) -> u64 {
    u64::from((day.num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7)
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridColumn {
    pub date: NaiveDate,
    /// Padding days that are not meeting dates cannot be selected
    pub active: bool,
    pub header: DateParts,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    /// Canonical time of day, unshifted
    pub time: NaiveTime,
    pub label: String,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: Vec<GridColumn>,
    pub rows: Vec<GridRow>,
    /// Closing time of the last row, shown under it
    pub end_label: String,
}

impl GridLayout {
    /// Slot under a cell. `None` outside the grid or on a padding day.
    pub fn cell(&self, row: usize, column: usize) -> Option<Slot> {
        let row = self.rows.get(row)?;
        let column = self.columns.get(column).filter(|c| c.active)?;
        Some(Slot::new(column.date, row.time))
    }
}
