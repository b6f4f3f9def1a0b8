//! WASM bindings for slot-engine.
//!
//! Exposes free-slot computation and multi-day event splitting to the calendar
//! client via `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! Each export is a thin wrapper over a `*_json` function that reports errors
//! as plain strings, so the JSON plumbing can be tested natively.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir client/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono_tz::Tz;
use serde::Serialize;
use slot_engine::json::{events_from_json, parse_range_bound};
use slot_engine::{MarkerStyle, SlotError};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON core
// ---------------------------------------------------------------------------

fn resolve_timezone(name: Option<&str>) -> Result<Tz, String> {
    match name {
        Some(name) => slot_engine::parse_timezone(name).map_err(|e| e.to_string()),
        None => Ok(Tz::UTC),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn engine_error(e: SlotError) -> String {
    e.to_string()
}

/// Free slots as a JSON array of `{start, end}` objects.
///
/// `events_json` is a JSON array of events; `range_start` and `range_end` are
/// dates (`YYYY-MM-DD`) or ISO 8601 datetimes. `timezone_name` defaults to UTC.
pub fn free_slots_json(
    events_json: &str,
    range_start: &str,
    range_end: &str,
    timezone_name: Option<&str>,
) -> Result<String, String> {
    let tz = resolve_timezone(timezone_name)?;
    let busy = events_from_json(events_json).map_err(engine_error)?;
    let start = parse_range_bound(range_start, &tz).map_err(engine_error)?;
    let end = parse_range_bound(range_end, &tz).map_err(engine_error)?;

    let slots = slot_engine::free_slots(start, end, &busy, &tz).map_err(engine_error)?;
    to_json(&slots)
}

/// Free slots as a JSON array of background markers
/// (`{groupId, start, end, display, color}`).
pub fn free_slot_markers_json(
    events_json: &str,
    range_start: &str,
    range_end: &str,
    timezone_name: Option<&str>,
) -> Result<String, String> {
    let tz = resolve_timezone(timezone_name)?;
    let busy = events_from_json(events_json).map_err(engine_error)?;
    let start = parse_range_bound(range_start, &tz).map_err(engine_error)?;
    let end = parse_range_bound(range_end, &tz).map_err(engine_error)?;

    let markers =
        slot_engine::free_slot_markers(start, end, &busy, &tz, &MarkerStyle::default())
            .map_err(engine_error)?;
    to_json(&markers)
}

/// Split the single event in `event_json` into single-day fragments.
pub fn split_event_json(event_json: &str, timezone_name: Option<&str>) -> Result<String, String> {
    let tz = resolve_timezone(timezone_name)?;
    let events = events_from_json(event_json).map_err(engine_error)?;
    let event = match events.as_slice() {
        [event] => event,
        _ => return Err(format!("expected exactly one event, got {}", events.len())),
    };
    let fragments = slot_engine::split(event, &tz).map_err(engine_error)?;
    to_json(&fragments)
}

/// Split events (a JSON event or array of events) into single-day fragments.
/// Every field besides `start` and `end` is copied onto each fragment.
pub fn split_events_json(events_json: &str, timezone_name: Option<&str>) -> Result<String, String> {
    let tz = resolve_timezone(timezone_name)?;
    let events = events_from_json(events_json).map_err(engine_error)?;
    let fragments = slot_engine::split_all(&events, &tz).map_err(engine_error)?;
    to_json(&fragments)
}

/// Whether the single event in `event_json` lasts more than one day.
pub fn is_multiday_json(event_json: &str) -> Result<bool, String> {
    let events = events_from_json(event_json).map_err(engine_error)?;
    match events.as_slice() {
        [event] => Ok(slot_engine::is_multiday(event)),
        _ => Err(format!("expected exactly one event, got {}", events.len())),
    }
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Find the free slots between the first and last day of a range.
///
/// Returns a JSON string containing an array of `{start, end}` objects with
/// RFC 3339 datetime strings.
#[wasm_bindgen(js_name = "freeSlots")]
pub fn free_slots(
    events_json: &str,
    range_start: &str,
    range_end: &str,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    free_slots_json(events_json, range_start, range_end, timezone.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Like `freeSlots`, but each slot carries the calendar's background tags.
#[wasm_bindgen(js_name = "freeSlotMarkers")]
pub fn free_slot_markers(
    events_json: &str,
    range_start: &str,
    range_end: &str,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    free_slot_markers_json(events_json, range_start, range_end, timezone.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Split one event into single-day fragments.
#[wasm_bindgen(js_name = "splitEvent")]
pub fn split_event(event_json: &str, timezone: Option<String>) -> Result<String, JsValue> {
    split_event_json(event_json, timezone.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Split every event in a JSON array into single-day fragments, in order.
#[wasm_bindgen(js_name = "splitEvents")]
pub fn split_events(events_json: &str, timezone: Option<String>) -> Result<String, JsValue> {
    split_events_json(events_json, timezone.as_deref()).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = "isMultidayEvent")]
pub fn is_multiday_event(event_json: &str) -> Result<bool, JsValue> {
    is_multiday_json(event_json).map_err(|e| JsValue::from_str(&e))
}
