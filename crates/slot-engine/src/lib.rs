//! # slot-engine
//!
//! Free-time computation and multi-day event splitting for a shared calendar.
//!
//! Given the busy events of a date range, the engine computes the free
//! intervals the calendar renders as background availability. Events that run
//! across several days can be cut into single-day fragments first. Calendar-day
//! boundaries always come from an explicit timezone policy, never from the
//! host's local time.
//!
//! ## Modules
//!
//! - [`interval`] — `Interval`, `Event<P>` and the `TimeSpan` trait
//! - [`day`] — day-boundary policy (`Utc` or any IANA zone)
//! - [`splitter`] — multi-day event → single-day fragments
//! - [`freeslots`] — busy intervals → free slots within a day range
//! - [`marker`] — free slots tagged for the rendering layer
//! - [`json`] — JSON event records with opaque extra fields
//! - [`error`] — Error types
//!
//! All operations are pure and synchronous.

pub mod day;
pub mod error;
pub mod freeslots;
pub mod interval;
pub mod json;
pub mod marker;
pub mod splitter;

pub use day::{parse_timezone, DayBoundary};
pub use error::{Result, SlotError};
pub use freeslots::{day_window, first_free_slot, free_slots, free_slots_in_window};
pub use interval::{Event, Interval, TimeSpan};
pub use json::{events_from_json, JsonEvent, Payload};
pub use marker::{free_slot_markers, FreeSlotMarker, MarkerStyle};
pub use splitter::{days_between, is_multiday, split, split_all};
