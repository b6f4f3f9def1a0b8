//! Split events that span several calendar days into single-day fragments.
//!
//! Whether an event needs splitting is decided by a day-count heuristic: the
//! raw duration divided by 24h, rounded up. An event shorter than 24 hours is
//! never split, even when it crosses midnight (23:00 to 01:00 stays whole).
//! Calendar clients depend on exactly this rule.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::day::DayBoundary;
use crate::error::Result;
use crate::interval::{Event, TimeSpan};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Number of days between two instants: `ceil(|end - start| / 24h)`.
pub fn days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let millis = (end - start).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// True when the event lasts more than one day by [`days_between`].
pub fn is_multiday<S: TimeSpan>(event: &S) -> bool {
    days_between(event.start(), event.end()) > 1
}

/// Split one event into fragments that each stay within a calendar day.
///
/// Every fragment but the last ends at `23:59:59.999` of its day; the last one
/// ends at the event's own end. Fragments carry a clone of the payload. Events
/// that are not multi-day come back as a single unchanged element.
///
/// # Errors
/// Returns `SlotError::InvalidInterval` if the event starts after it ends.
pub fn split<P, D>(event: &Event<P>, days: &D) -> Result<Vec<Event<P>>>
where
    P: Clone,
    D: DayBoundary + ?Sized,
{
    event.validate()?;

    if !is_multiday(event) {
        return Ok(vec![event.clone()]);
    }

    let mut fragments = Vec::new();
    let mut current_start = event.start;

    while current_start < event.end {
        let day_end = days.end_of_day(current_start)?;
        fragments.push(event.with_bounds(current_start, day_end.min(event.end)));
        current_start = days.start_of_next_day(current_start)?;
    }

    debug!(
        start = %event.start,
        end = %event.end,
        fragments = fragments.len(),
        "split multi-day event"
    );

    Ok(fragments)
}

/// Split every event in `events`, keeping input order.
///
/// The first invalid event aborts the whole batch.
pub fn split_all<P, D>(events: &[Event<P>], days: &D) -> Result<Vec<Event<P>>>
where
    P: Clone,
    D: DayBoundary + ?Sized,
{
    let mut out = Vec::with_capacity(events.len());
    for event in events {
        out.extend(split(event, days)?);
    }
    Ok(out)
}
