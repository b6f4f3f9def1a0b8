//! Free slots tagged for the calendar's background layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::day::DayBoundary;
use crate::error::Result;
use crate::freeslots::free_slots;
use crate::interval::{Interval, TimeSpan};

/// Visual tag stamped on every free slot. The defaults are what the calendar
/// client groups and renders as transparent background blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerStyle {
    pub group_id: String,
    pub display: String,
    pub color: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            group_id: "freeSlot".to_string(),
            display: "background".to_string(),
            color: "transparent".to_string(),
        }
    }
}

impl MarkerStyle {
    pub fn mark(&self, slot: &Interval) -> FreeSlotMarker {
        FreeSlotMarker {
            group_id: self.group_id.clone(),
            start: slot.start,
            end: slot.end,
            display: self.display.clone(),
            color: self.color.clone(),
        }
    }
}

/// A free slot as the rendering layer consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeSlotMarker {
    pub group_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub display: String,
    pub color: String,
}

/// [`free_slots`] wrapped as markers in `style`.
pub fn free_slot_markers<B, D>(
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    busy: &[B],
    days: &D,
    style: &MarkerStyle,
) -> Result<Vec<FreeSlotMarker>>
where
    B: TimeSpan,
    D: DayBoundary + ?Sized,
{
    Ok(free_slots(range_start, range_end, busy, days)?
        .iter()
        .map(|slot| style.mark(slot))
        .collect())
}
