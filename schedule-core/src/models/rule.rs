//! Weekly delivery rule

use chrono::Weekday;

use crate::calendar::weekday_from_sunday_index;

/// One row of a region's weekly schedule: orders placed before the cutoff
/// time on `cutoff_dow` are delivered on the following occurrence of
/// `delivery_dow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyDeliveryRule {
    pub cutoff_dow: Weekday,
    pub delivery_dow: Weekday,
}

impl WeeklyDeliveryRule {
    /// Build from the wire's Sunday-based indices; `None` when either index
    /// is out of range
    pub fn from_indices(cutoff: u8, delivery: u8) -> Option<Self> {
        Some(Self {
            cutoff_dow: weekday_from_sunday_index(cutoff)?,
            delivery_dow: weekday_from_sunday_index(delivery)?,
        })
    }
}
