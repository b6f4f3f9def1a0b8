//! JSON event records as the calendar backend stores them.
//!
//! Events arrive as objects with `start` and `end` plus any number of other
//! fields. Timestamps may be RFC 3339 strings, naive `YYYY-MM-DDTHH:MM:SS[.fff]`
//! strings (read as UTC), or epoch milliseconds. Everything except `start` and
//! `end` is kept as the event payload.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::day::DayBoundary;
use crate::error::{Result, SlotError};
use crate::interval::Event;

/// Opaque event fields, in their original order.
pub type Payload = Map<String, Value>;

/// An event whose payload is raw JSON.
pub type JsonEvent = Event<Payload>;

/// Parse a datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 (with offset) and naive datetimes, which are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| SlotError::InvalidInput(format!("invalid datetime '{}': {}", raw, e)))
}

/// Parse a range bound: a bare date means that date's midnight in `days`,
/// anything else goes through [`parse_timestamp`].
pub fn parse_range_bound<D>(raw: &str, days: &D) -> Result<DateTime<Utc>>
where
    D: DayBoundary + ?Sized,
{
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => days.midnight(date),
        Err(_) => parse_timestamp(raw),
    }
}

fn timestamp_field(object: &Payload, key: &str) -> Result<DateTime<Utc>> {
    match object.get(key) {
        Some(Value::String(raw)) => parse_timestamp(raw),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .ok_or_else(|| {
                SlotError::InvalidInput(format!("invalid epoch millis in '{}': {}", key, n))
            }),
        Some(other) => Err(SlotError::InvalidInput(format!(
            "'{}' must be a string or number, got {}",
            key, other
        ))),
        None => Err(SlotError::InvalidInput(format!("missing '{}'", key))),
    }
}

/// Turn one JSON object into an event, moving the other fields to the payload.
pub fn event_from_value(value: Value) -> Result<JsonEvent> {
    let Value::Object(mut object) = value else {
        return Err(SlotError::InvalidInput("event must be a JSON object".to_string()));
    };
    let start = timestamp_field(&object, "start")?;
    let end = timestamp_field(&object, "end")?;
    object.remove("start");
    object.remove("end");
    Ok(Event::new(start, end, object))
}

/// Parse a JSON array of events, or a single event object.
pub fn events_from_json(json: &str) -> Result<Vec<JsonEvent>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| SlotError::InvalidInput(format!("invalid events JSON: {}", e)))?;
    match value {
        Value::Array(items) => items.into_iter().map(event_from_value).collect(),
        object @ Value::Object(_) => Ok(vec![event_from_value(object)?]),
        _ => Err(SlotError::InvalidInput(
            "expected a JSON array of events or a single event object".to_string(),
        )),
    }
}
