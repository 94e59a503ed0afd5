pub mod config;
pub mod error;
pub mod heatmap;
pub mod label;
pub mod meeting;
pub mod participant;
pub mod selection;
pub mod slot;
pub mod store;
pub mod time;
pub mod timezone;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::GridConfig;
pub use error::SlotError;
pub use heatmap::{aggregate, best_slots, Heatmap, HeatmapEntry};
pub use label::DisplaySlotLabel;
pub use meeting::Meeting;
pub use participant::{ParticipantAvailability, SelectionSet};
pub use selection::{DragMode, GestureState, PointerEvent, SelectionMachine};
pub use slot::{enumerate, Granularity, Slot};
pub use store::{AvailabilityStore, MeetingView, MemoryStore};
