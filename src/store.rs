use crate::config::GridConfig;
use crate::error::SlotError;
use crate::heatmap::{self, cell_shade, CellShade, Heatmap};
use crate::label::{availability_summary, DisplaySlotLabel};
use crate::meeting::{GridLayout, Meeting};
use crate::participant::ParticipantAvailability;
use crate::slot::Slot;
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::{BTreeSet, HashMap};

/// Persistence owned by the surrounding application.
/// Nothing in this crate writes to it except through `save`.
pub trait AvailabilityStore {
    fn meeting(&self, id: &str) -> Result<Meeting, SlotError>;

    /// Records in the order they were first saved
    fn records(&self, id: &str) -> Result<Vec<ParticipantAvailability>, SlotError>;

    /// Replaces the participant's whole slot set, or adds a new record
    fn save(&mut self, id: &str, record: ParticipantAvailability) -> Result<(), SlotError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    meetings: HashMap<String, Meeting>,
    records: HashMap<String, Vec<ParticipantAvailability>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn insert_meeting(&mut self, meeting: Meeting) {
        self.records.entry(meeting.id.clone()).or_default();
        self.meetings.insert(meeting.id.clone(), meeting);
    }
}

impl AvailabilityStore for MemoryStore {
    fn meeting(&self, id: &str) -> Result<Meeting, SlotError> {
        self.meetings
            .get(id)
            .cloned()
            .ok_or_else(|| SlotError::MeetingNotFound { id: id.to_string() })
    }

    fn records(&self, id: &str) -> Result<Vec<ParticipantAvailability>, SlotError> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| SlotError::MeetingNotFound { id: id.to_string() })
    }

    fn save(&mut self, id: &str, record: ParticipantAvailability) -> Result<(), SlotError> {
        let records = self
            .records
            .get_mut(id)
            .ok_or_else(|| SlotError::MeetingNotFound { id: id.to_string() })?;

        match records.iter_mut().find(|r| r.name == record.name) {
            Some(existing) => existing.slots = record.slots,
            None => records.push(record),
        }

        Ok(())
    }
}

/// Everything a results grid needs for one meeting, recomputed from scratch
/// on every load.
#[derive(Debug, Clone)]
pub struct MeetingView {
    pub meeting: Meeting,
    pub config: GridConfig,
    pub universe: Vec<Slot>,
    pub records: Vec<ParticipantAvailability>,
    pub heatmap: Heatmap,
    pub best: BTreeSet<Slot>,
    pub layout: GridLayout,
    /// Display timezone minus authoring timezone, in minutes
    pub offset_minutes: i32,
}

impl MeetingView {
    pub fn load<S>(
        store: &S,
        id: &str,
        config: &GridConfig,
        at: DateTime<Utc>,
    ) -> Result<MeetingView, SlotError>
    where
        S: AvailabilityStore + ?Sized,
    {
        let meeting = store.meeting(id)?;
        meeting.validate()?;

        let records = store.records(id)?;
        let offset_minutes = config.display_offset(&meeting.timezone, at);

        let universe = meeting.universe(config.granularity)?;
        let heatmap = heatmap::aggregate(&universe, &records);
        let best = heatmap::best_slots(&heatmap, records.len());
        let layout = meeting.layout(config.granularity, config.week_start, offset_minutes)?;

        debug!(
            "Loaded meeting {} with {} responses, {} slots everyone can make",
            id,
            records.len(),
            best.len()
        );

        Ok(MeetingView {
            meeting,
            config: config.clone(),
            universe,
            records,
            heatmap,
            best,
            layout,
            offset_minutes,
        })
    }

    pub fn participants(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn label(&self, slot: &Slot) -> DisplaySlotLabel {
        DisplaySlotLabel::new(slot, self.config.granularity, self.offset_minutes)
    }

    /// Tooltip for a heatmap cell. `None` for slots outside the meeting
    /// or before anyone responded.
    pub fn summary(&self, slot: &Slot) -> Option<String> {
        self.heatmap
            .get(slot)
            .filter(|entry| entry.total > 0)
            .map(|entry| availability_summary(&self.label(slot), entry))
    }

    /// Names that cannot make `slot`
    pub fn missing(&self, slot: &Slot) -> Vec<&str> {
        match self.heatmap.get(slot) {
            Some(entry) => heatmap::missing_participants(entry, self.participants()),
            None => self.participants(),
        }
    }

    /// Fill for `slot`, focused on the participant named `focus` if any
    pub fn shade(&self, slot: &Slot, focus: Option<&str>) -> CellShade {
        let focus = focus.and_then(|name| self.records.iter().find(|r| r.name == name));
        cell_shade(slot, self.heatmap.get(slot), focus)
    }
}
