//! Kitchen wall-clock derivation
//!
//! The kitchen's offset arrives as signed minutes in the schedule document;
//! the customer's offset comes from their own local clock. The calculator
//! always works in kitchen time.

use chrono::{Datelike, DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// How the kitchen/customer timezone difference is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OffsetMode {
    /// Apply the signed `kitchen - customer` offset in both directions
    #[default]
    Signed,
    /// Apply the offset only when the kitchen is ahead of the customer,
    /// matching the deployed storefront's behavior
    AheadOnly,
}

/// The kitchen's local wall-clock at a single instant.
///
/// Immutable; rebuild it for every calculation so "now" never goes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KitchenClock {
    now: NaiveDateTime,
}

impl KitchenClock {
    /// Derive the kitchen clock from the customer's local clock
    pub fn now_from(
        customer_now: DateTime<FixedOffset>,
        kitchen_offset_minutes: i32,
        mode: OffsetMode,
    ) -> Self {
        let customer_offset_minutes = customer_now.offset().local_minus_utc() / 60;
        let diff = kitchen_offset_minutes - customer_offset_minutes;
        let applied = match mode {
            OffsetMode::Signed => diff,
            OffsetMode::AheadOnly => diff.max(0),
        };
        Self {
            now: customer_now.naive_local() + Duration::minutes(applied as i64),
        }
    }

    /// Build directly from a kitchen-local timestamp (tests, replays)
    pub fn from_local(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn date(&self) -> NaiveDate {
        self.now.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.now.time()
    }

    pub fn weekday(&self) -> Weekday {
        self.now.weekday()
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn customer_at(offset_minutes: i32, h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_minutes * 60)
            .unwrap()
            .with_ymd_and_hms(2026, 8, 3, h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_kitchen_ahead_of_customer() {
        // Customer in Perth (+480), kitchen in Melbourne (+600)
        let clock = KitchenClock::now_from(customer_at(480, 9, 0), 600, OffsetMode::Signed);
        assert_eq!(clock.time(), NaiveTime::from_hms_opt(11, 0, 0).unwrap());
    }

    #[test]
    fn test_kitchen_behind_customer_signed() {
        // Customer in Auckland (+720), kitchen in Melbourne (+600)
        let clock = KitchenClock::now_from(customer_at(720, 9, 0), 600, OffsetMode::Signed);
        assert_eq!(clock.time(), NaiveTime::from_hms_opt(7, 0, 0).unwrap());
    }

    #[test]
    fn test_kitchen_behind_customer_ahead_only_clamps() {
        // The clamp mode ignores a negative difference entirely
        let clock = KitchenClock::now_from(customer_at(720, 9, 0), 600, OffsetMode::AheadOnly);
        assert_eq!(clock.time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_offset_can_cross_midnight() {
        let clock = KitchenClock::now_from(customer_at(480, 23, 30), 600, OffsetMode::Signed);
        assert_eq!(clock.date(), NaiveDate::from_ymd_opt(2026, 8, 4).unwrap());
        assert_eq!(clock.time(), NaiveTime::from_hms_opt(1, 30, 0).unwrap());
    }

    #[test]
    fn test_same_offset_is_identity() {
        let clock = KitchenClock::now_from(customer_at(600, 9, 0), 600, OffsetMode::Signed);
        assert_eq!(clock.time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(clock.weekday(), Weekday::Mon);
    }
}
