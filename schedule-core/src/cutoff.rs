//! Daily cutoff handling
//!
//! The booking day is the effective "today" for schedule lookups: once the
//! kitchen's daily cutoff has passed, lookups run as if it were already the
//! next calendar day.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::clock::KitchenClock;
use crate::error::{ScheduleError, ScheduleResult};

/// Build the kitchen's daily cutoff from the document's
/// `[hour, minute, second]` array
pub fn cutoff_from_parts(parts: [u32; 3]) -> ScheduleResult<NaiveTime> {
    NaiveTime::from_hms_opt(parts[0], parts[1], parts[2]).ok_or_else(|| {
        ScheduleError::InvalidDocument(format!("cutoff_time {:?} out of range", parts))
    })
}

/// Parse an hour-slot cutoff string (`"HH:MM"`); `None` with a warning on
/// bad input, so one broken slot never takes the region down
pub fn parse_slot_cutoff(raw: &str) -> Option<NaiveTime> {
    match NaiveTime::parse_from_str(raw, "%H:%M") {
        Ok(time) => Some(time),
        Err(e) => {
            tracing::warn!("Failed to parse hour-slot cutoff '{}': {}", raw, e);
            None
        }
    }
}

/// Effective booking day for schedule lookups.
///
/// Strictly after the cutoff the booking day advances to the next calendar
/// day; at or before it, today stands. Only the day-of-week of the result
/// is meaningful to callers.
pub fn apply_cutoff(kitchen: &KitchenClock, cutoff: NaiveTime) -> NaiveDate {
    if kitchen.time() > cutoff {
        kitchen.date() + Duration::days(1)
    } else {
        kitchen.date()
    }
}
