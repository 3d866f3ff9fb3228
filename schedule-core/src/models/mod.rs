//! Data models
//!
//! Wire types mirror the hosted delivery-data JSON document; conversion
//! helpers validate weekday indices and cutoff strings at the boundary so
//! the calculator only ever sees well-formed rules.

pub mod attributes;
pub mod rule;
pub mod schedule;

// Re-exports
pub use attributes::*;
pub use rule::*;
pub use schedule::*;
