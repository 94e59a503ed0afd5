use crate::heatmap::{self, heatmap_color};
use crate::label::{format_range, format_time};
use crate::participant::{ParticipantAvailability, SelectionSet};
use crate::selection::{PointerEvent, SelectionMachine};
use crate::slot::{self, Granularity, Slot};
use crate::time::{self, parse_time_of_day};
use crate::timezone;
use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn universe(
    dates: JsValue,
    start_time: &str,
    end_time: &str,
    granularity: u32,
) -> Result<Vec<Slot>, JsValue> {
    let dates: Vec<NaiveDate> = serde_wasm_bindgen::from_value(dates)?;
    let start = parse_time_of_day(start_time).map_err(to_js)?;
    let end = parse_time_of_day(end_time).map_err(to_js)?;
    let granularity = Granularity::new(granularity).map_err(to_js)?;

    slot::enumerate(&dates, start, end, granularity).map_err(to_js)
}

#[wasm_bindgen(js_name = generateSlots)]
pub fn generate_slots(
    dates: JsValue,
    start_time: &str,
    end_time: &str,
    granularity: u32,
) -> Result<JsValue, JsValue> {
    let slots = universe(dates, start_time, end_time, granularity)?;
    Ok(serde_wasm_bindgen::to_value(&slots)?)
}

#[wasm_bindgen(js_name = computeHeatmap)]
pub fn compute_heatmap(universe: JsValue, records: JsValue) -> Result<JsValue, JsValue> {
    let universe: Vec<Slot> = serde_wasm_bindgen::from_value(universe)?;
    let records: Vec<ParticipantAvailability> = serde_wasm_bindgen::from_value(records)?;

    Ok(serde_wasm_bindgen::to_value(&heatmap::aggregate(
        &universe, &records,
    ))?)
}

#[wasm_bindgen(js_name = findBestSlots)]
pub fn find_best_slots(universe: JsValue, records: JsValue) -> Result<JsValue, JsValue> {
    let universe: Vec<Slot> = serde_wasm_bindgen::from_value(universe)?;
    let records: Vec<ParticipantAvailability> = serde_wasm_bindgen::from_value(records)?;

    let heatmap = heatmap::aggregate(&universe, &records);
    Ok(serde_wasm_bindgen::to_value(&heatmap::best_slots(
        &heatmap,
        records.len(),
    ))?)
}

#[wasm_bindgen(js_name = heatmapColor)]
pub fn heatmap_css(count: usize, total: usize) -> Option<String> {
    heatmap_color(count, total).css()
}

#[wasm_bindgen(js_name = offsetMinutes)]
pub fn offset_minutes(from: &str, to: &str) -> i32 {
    timezone::offset_minutes_now(from, to)
}

#[wasm_bindgen(js_name = applyOffsetToTime)]
pub fn apply_offset_to_time(time: &str, offset_minutes: i32) -> Result<String, JsValue> {
    let time = parse_time_of_day(time).map_err(to_js)?;
    Ok(time::format_24h(time::apply_offset(time, offset_minutes)))
}

#[wasm_bindgen(js_name = formatSlotTimeOffset)]
pub fn format_slot_time_offset(slot: &str, offset_minutes: i32) -> Result<String, JsValue> {
    let slot: Slot = slot.parse().map_err(to_js)?;
    Ok(format_time(time::apply_offset(slot.time(), offset_minutes)))
}

#[wasm_bindgen(js_name = formatSlotRangeOffset)]
pub fn format_slot_range_offset(
    slot: &str,
    offset_minutes: i32,
    granularity: u32,
) -> Result<String, JsValue> {
    let slot: Slot = slot.parse().map_err(to_js)?;
    let granularity = Granularity::new(granularity).map_err(to_js)?;
    Ok(format_range(slot.time(), granularity, offset_minutes))
}

/// A selection being edited on an availability grid
#[wasm_bindgen]
pub struct Gesture {
    machine: SelectionMachine,
    selection: SelectionSet,
}

#[wasm_bindgen]
impl Gesture {
    #[wasm_bindgen(constructor)]
    pub fn new(selected: JsValue, read_only: bool) -> Result<Gesture, JsValue> {
        let selection: SelectionSet = if selected.is_undefined() || selected.is_null() {
            SelectionSet::new()
        } else {
            serde_wasm_bindgen::from_value(selected)?
        };
        let machine = if read_only {
            SelectionMachine::read_only()
        } else {
            SelectionMachine::new()
        };

        Ok(Gesture { machine, selection })
    }

    /// Returns the updated selection, or `undefined` when ignored
    pub fn press(&mut self, slot: &str) -> Result<JsValue, JsValue> {
        let slot: Slot = slot.parse().map_err(to_js)?;
        match self.machine.press_start(slot, &mut self.selection) {
            Some(selection) => Ok(serde_wasm_bindgen::to_value(selection)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn enter(&mut self, slot: Option<String>) -> Result<JsValue, JsValue> {
        let slot = match slot {
            Some(slot) => slot.parse::<Slot>().map_err(to_js)?,
            None => return Ok(JsValue::UNDEFINED),
        };
        match self.machine.enter_cell(slot, &mut self.selection) {
            Some(selection) => Ok(serde_wasm_bindgen::to_value(selection)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Returns the final selection when a gesture ended, or `undefined`
    pub fn release(&mut self) -> Result<JsValue, JsValue> {
        self.finish(PointerEvent::Release)
    }

    pub fn cancel(&mut self) -> Result<JsValue, JsValue> {
        self.finish(PointerEvent::Cancel)
    }

    pub fn selection(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.selection)?)
    }
}

impl Gesture {
    fn finish(&mut self, event: PointerEvent) -> Result<JsValue, JsValue> {
        match self.machine.handle(event, &mut self.selection) {
            Some(selection) => Ok(serde_wasm_bindgen::to_value(selection)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }
}
