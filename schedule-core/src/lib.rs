//! Delivery-schedule domain for the meal-kitchen storefront
//!
//! Pure calculation library: weekly cutoff/delivery arithmetic, same-day and
//! next-day windows, subscription billing dates, and region lookup.
//! No I/O — fetching and session state live in the `delivery-client` crate.

pub mod blackout;
pub mod calculator;
pub mod calendar;
pub mod clock;
pub mod cutoff;
pub mod error;
pub mod location;
pub mod models;

// Re-exports
pub use blackout::BlackoutDates;
pub use calculator::{
    DeliveryWindow, ScheduleOptions, SpecialDay, compute_delivery_dates, display_day_count,
    payment_date, same_or_next_day_window,
};
pub use clock::{KitchenClock, OffsetMode};
pub use cutoff::{apply_cutoff, cutoff_from_parts, parse_slot_cutoff};
pub use error::{ScheduleError, ScheduleResult};
pub use location::{DeliveryLocation, region_by_name, region_for_address, search_places};
pub use models::{DeliveryScheduleDocument, Region, WeeklyDeliveryRule};
