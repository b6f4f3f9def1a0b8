//! Compute free time slots over a range of calendar days.
//!
//! The range always runs from midnight of the first day to `23:59:59.999` of
//! the last day. Busy intervals are clipped to that window, sorted by start,
//! then scanned greedily: each gap before the next busy interval is free, and
//! the busy region grows to the furthest end of every interval that overlaps
//! or touches it before the scan moves on.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace};

use crate::day::DayBoundary;
use crate::error::Result;
use crate::interval::{Interval, TimeSpan};

/// The `[midnight(range_start), end_of_day(range_end)]` window for a query.
///
/// # Errors
/// Returns `SlotError::InvalidInterval` if the last day precedes the first.
pub fn day_window<D>(
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    days: &D,
) -> Result<Interval>
where
    D: DayBoundary + ?Sized,
{
    let start = days.start_of_day(range_start)?;
    let end = days.end_of_day(range_end)?;
    Interval::new(start, end)
}

/// Find the free slots between `range_start`'s day and `range_end`'s day.
///
/// Busy spans may overlap, touch, or reach outside the window. The result is
/// sorted, pairwise disjoint, and never contains a zero-length slot. With no
/// busy spans the whole window is one slot.
///
/// # Errors
/// Returns `SlotError::InvalidInterval` if any busy span starts after it ends,
/// or if the range itself is reversed. Nothing is computed in that case.
pub fn free_slots<B, D>(
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    busy: &[B],
    days: &D,
) -> Result<Vec<Interval>>
where
    B: TimeSpan,
    D: DayBoundary + ?Sized,
{
    let window = day_window(range_start, range_end, days)?;
    free_slots_in_window(window, busy)
}

/// Same as [`free_slots`] over an explicit window, without day rounding.
pub fn free_slots_in_window<B: TimeSpan>(window: Interval, busy: &[B]) -> Result<Vec<Interval>> {
    window.validate()?;
    for span in busy {
        span.validate()?;
    }

    // Clipped, non-empty, stable-sorted by start: ties keep input order.
    let mut blocking: Vec<Interval> = busy
        .iter()
        .filter_map(|span| span.interval().clip_to(&window))
        .filter(|interval| !interval.is_empty())
        .collect();
    blocking.sort_by_key(|interval| interval.start);

    let mut slots = Vec::new();
    let mut cursor = window.start;
    let mut pending = blocking.iter().peekable();

    while let Some(selected) = pending.next() {
        push_slot(&mut slots, cursor, selected.start);

        // Absorb everything that starts before the busy region ends.
        let mut reach = selected.end;
        while let Some(next) = pending.next_if(|next| next.start <= reach) {
            reach = reach.max(next.end);
        }
        cursor = reach;
    }

    push_slot(&mut slots, cursor, window.end);

    debug!(
        window_start = %window.start,
        window_end = %window.end,
        busy = busy.len(),
        free = slots.len(),
        "computed free slots"
    );

    Ok(slots)
}

/// The first free slot lasting at least `min_duration`, if there is one.
pub fn first_free_slot<B, D>(
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    busy: &[B],
    min_duration: Duration,
    days: &D,
) -> Result<Option<Interval>>
where
    B: TimeSpan,
    D: DayBoundary + ?Sized,
{
    Ok(free_slots(range_start, range_end, busy, days)?
        .into_iter()
        .find(|slot| slot.duration() >= min_duration))
}

fn push_slot(slots: &mut Vec<Interval>, start: DateTime<Utc>, end: DateTime<Utc>) {
    if start < end {
        trace!(%start, %end, "free slot");
        slots.push(Interval { start, end });
    }
}
