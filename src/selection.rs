use crate::participant::SelectionSet;
use crate::slot::Slot;
use log::trace;

/// What a gesture does to every cell it passes over.
/// Decided once, from the first cell pressed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DragMode {
    Add,
    Remove,
}

impl DragMode {
    /// Idempotent: adding a present slot or removing an absent one is a no-op
    fn apply(self, slot: Slot, selection: &mut SelectionSet) {
        match self {
            DragMode::Add => selection.insert(slot),
            DragMode::Remove => selection.remove(&slot),
        };
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragMode),
}

#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerEvent {
    /// Mouse down or touch start over a cell
    Press(Slot),
    /// Pointer moved onto a cell. Touch moves that hit no cell carry `None`.
    Enter(Option<Slot>),
    /// Pointer up anywhere, on or off the grid
    Release,
    /// Tracking target lost or touch sequence ended
    Cancel,
}

/// Drag-to-toggle state for one interacting user.
///
/// The machine only remembers the gesture mode. The selection itself is
/// owned by the caller and passed into every event, which receives it back
/// whenever the event was accepted.
#[derive(Debug, Clone, Default)]
pub struct SelectionMachine {
    state: GestureState,
    read_only: bool,
}

impl SelectionMachine {
    pub fn new() -> SelectionMachine {
        SelectionMachine::default()
    }

    /// Inert machine for heatmap and results grids. Never leaves `Idle`.
    pub fn read_only() -> SelectionMachine {
        SelectionMachine {
            state: GestureState::Idle,
            read_only: true,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    /// Starts a gesture on `slot`. The gesture removes if `slot` is already
    /// selected, and adds otherwise. A press during a gesture whose release
    /// never arrived starts over with a freshly decided mode.
    ///
    /// # Examples
    /// ```
    /// use overlap_libs::participant::SelectionSet;
    /// use overlap_libs::selection::{DragMode, GestureState, SelectionMachine};
    /// use overlap_libs::slot::Slot;
    ///
    /// let nine: Slot = "2025-01-15 09:00".parse().unwrap();
    /// let mut selection = SelectionSet::new();
    /// let mut machine = SelectionMachine::new();
    ///
    /// let updated = machine.press_start(nine, &mut selection).unwrap();
    /// assert!(updated.contains(&nine));
    /// assert_eq!(machine.state(), GestureState::Dragging(DragMode::Add));
    /// ```
    pub fn press_start<'s>(
        &mut self,
        slot: Slot,
        selection: &'s mut SelectionSet,
    ) -> Option<&'s SelectionSet> {
        if self.read_only {
            trace!("Ignoring press on {}, grid is read only", slot);
            return None;
        }

        let mode = if selection.contains(&slot) {
            DragMode::Remove
        } else {
            DragMode::Add
        };

        trace!("{:?} -> Dragging({:?}) on {}", self.state, mode, slot);
        self.state = GestureState::Dragging(mode);
        mode.apply(slot, selection);

        Some(selection)
    }

    /// Applies the gesture mode to `slot` while dragging. Ignored when idle.
    pub fn enter_cell<'s>(
        &mut self,
        slot: Slot,
        selection: &'s mut SelectionSet,
    ) -> Option<&'s SelectionSet> {
        match self.state {
            GestureState::Dragging(mode) if !self.read_only => {
                trace!("Dragging({:?}) over {}", mode, slot);
                mode.apply(slot, selection);
                Some(selection)
            }
            _ => None,
        }
    }

    /// Ends any gesture. Returns the state the machine was in.
    pub fn release(&mut self) -> GestureState {
        let previous = std::mem::take(&mut self.state);
        if previous != GestureState::Idle {
            trace!("{:?} -> Idle", previous);
        }
        previous
    }

    /// Ends any gesture without further effect on the selection
    pub fn cancel(&mut self) -> GestureState {
        self.release()
    }

    /// Single intake for pointer and touch events. `Some` carries the
    /// updated selection for the caller to keep or persist, including the
    /// final selection when a release or cancel ends a gesture.
    pub fn handle<'s>(
        &mut self,
        event: PointerEvent,
        selection: &'s mut SelectionSet,
    ) -> Option<&'s SelectionSet> {
        match event {
            PointerEvent::Press(slot) => self.press_start(slot, selection),
            PointerEvent::Enter(Some(slot)) => self.enter_cell(slot, selection),
            PointerEvent::Enter(None) => None,
            PointerEvent::Release | PointerEvent::Cancel => match self.release() {
                GestureState::Dragging(_) => Some(selection),
                GestureState::Idle => None,
            },
        }
    }
}
