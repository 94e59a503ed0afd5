use crate::slot::Granularity;
use crate::timezone;
use chrono::{DateTime, Utc, Weekday};
use std::env;

pub const GRANULARITY_VAR: &str = "OVERLAP_GRANULARITY";
pub const WEEK_START_VAR: &str = "OVERLAP_WEEK_START";
pub const DISPLAY_TZ_VAR: &str = "OVERLAP_DISPLAY_TZ";

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    pub granularity: Granularity,
    #[cfg_attr(feature = "serde", serde(rename = "weekStart"))]
    pub week_start: Weekday,
    /// Viewer's timezone. `None` renders in each meeting's own timezone.
    #[cfg_attr(feature = "serde", serde(rename = "displayTimezone"))]
    pub display_timezone: Option<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            granularity: Granularity::default(),
            week_start: Weekday::Mon,
            display_timezone: None,
        }
    }
}

impl GridConfig {
    /// Defaults overlaid with the `OVERLAP_*` environment variables
    pub fn from_env() -> GridConfig {
        GridConfig::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` finds.
    /// Values that fail to parse keep the default.
    pub fn from_lookup<F>(lookup: F) -> GridConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = GridConfig::default();

        if let Some(granularity) = lookup(GRANULARITY_VAR)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .and_then(|m| Granularity::new(m).ok())
        {
            config.granularity = granularity;
        }

        if let Some(week_start) = lookup(WEEK_START_VAR).and_then(|v| v.trim().parse::<Weekday>().ok()) {
            config.week_start = week_start;
        }

        config.display_timezone = lookup(DISPLAY_TZ_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        config
    }

    /// Minutes to shift labels of a meeting authored in `meeting_timezone`.
    /// Zero without a display timezone, or when both are the same.
    pub fn display_offset(&self, meeting_timezone: &str, at: DateTime<Utc>) -> i32 {
        match &self.display_timezone {
            Some(display) if display != meeting_timezone => {
                timezone::offset_minutes(meeting_timezone, display, at)
            }
            _ => 0,
        }
    }
}
