#![no_main]
use libfuzzer_sys::fuzz_target;
use overlap_libs::{
    DragMode, GestureState, PointerEvent, SelectionMachine, SelectionSet, Slot,
};
use std::collections::BTreeSet;

fuzz_target!(|data: (BTreeSet<Slot>, Vec<PointerEvent>)| {
    let (mut selection, events) = data;
    let mut machine = SelectionMachine::new();

    for event in events {
        let before: SelectionSet = selection.clone();
        let mode = match machine.state() {
            GestureState::Dragging(mode) => Some(mode),
            GestureState::Idle => None,
        };

        let emitted = machine.handle(event, &mut selection).is_some();

        match event {
            PointerEvent::Release | PointerEvent::Cancel => {
                assert_eq!(machine.state(), GestureState::Idle);
                assert_eq!(emitted, mode.is_some(), "Only an ending gesture reports");
                assert_eq!(before, selection, "Releasing never edits the selection");
            }
            PointerEvent::Enter(None) => assert_eq!(before, selection),
            PointerEvent::Enter(Some(slot)) => match mode {
                None => assert_eq!(before, selection, "Idle machines ignore movement"),
                Some(DragMode::Add) => {
                    assert!(selection.contains(&slot));
                    assert!(before.is_subset(&selection), "Adding never removes");
                }
                Some(DragMode::Remove) => {
                    assert!(!selection.contains(&slot));
                    assert!(selection.is_subset(&before), "Removing never adds");
                }
            },
            PointerEvent::Press(slot) => {
                assert_eq!(selection.contains(&slot), !before.contains(&slot));
                assert!(machine.is_dragging());
            }
        }
    }
});
