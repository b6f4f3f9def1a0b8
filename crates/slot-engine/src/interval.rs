//! Time intervals and calendar events.
//!
//! An [`Interval`] is a plain `[start, end]` pair. An [`Event`] is an interval
//! carrying an opaque payload (title, description, owner, ...) that the engine
//! never inspects. Both implement [`TimeSpan`], which is all the free-slot scan
//! needs to see.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Anything with a start and an end instant.
pub trait TimeSpan {
    fn start(&self) -> DateTime<Utc>;
    fn end(&self) -> DateTime<Utc>;

    /// The bare `[start, end]` of this span.
    fn interval(&self) -> Interval {
        Interval {
            start: self.start(),
            end: self.end(),
        }
    }

    /// Reject spans whose start is after their end.
    fn validate(&self) -> Result<()> {
        check_bounds(self.start(), self.end())
    }
}

/// A busy or free time range. `start <= end` for every interval the engine
/// produces; zero-length intervals are legal input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Build an interval, failing with [`SlotError::InvalidInterval`] when
    /// `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        check_bounds(start, end)?;
        Ok(Self { start, end })
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The part of `self` that lies inside `window`, if any.
    pub fn clip_to(&self, window: &Interval) -> Option<Interval> {
        let start = self.start.max(window.start);
        let end = self.end.min(window.end);
        (start <= end).then_some(Interval { start, end })
    }
}

impl TimeSpan for Interval {
    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// A calendar event: an interval plus whatever the caller attached to it.
///
/// The payload is flattened when serialized, so a JSON event such as
/// `{"start": ..., "end": ..., "title": "Standup"}` round-trips with its extra
/// fields intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event<P> {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: P,
}

impl<P> Event<P> {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, payload: P) -> Self {
        Self {
            start,
            end,
            payload,
        }
    }
}

impl<P: Clone> Event<P> {
    /// Copy of this event with new bounds and the same payload.
    pub fn with_bounds(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            payload: self.payload.clone(),
        }
    }
}

impl<P> TimeSpan for Event<P> {
    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

fn check_bounds(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
    if start > end {
        return Err(SlotError::InvalidInterval { start, end });
    }
    Ok(())
}
