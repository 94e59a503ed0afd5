use crate::slot::Slot;
use std::collections::BTreeSet;

/// Slots a single participant is editing before saving
pub type SelectionSet = BTreeSet<Slot>;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantAvailability {
    #[cfg_attr(feature = "serde", serde(rename = "participantName"))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub slots: SelectionSet,
}

impl ParticipantAvailability {
    /// Constructs a new record with the slots this participant *can* meet.
    /// Names are matched case-sensitively.
    pub fn new<I>(name: &str, slots: I) -> ParticipantAvailability
    where
        I: IntoIterator<Item = Slot>,
    {
        ParticipantAvailability {
            name: name.to_string(),
            slots: slots.into_iter().collect(),
        }
    }

    pub fn is_available(&self, slot: &Slot) -> bool {
        self.slots.contains(slot)
    }
}
