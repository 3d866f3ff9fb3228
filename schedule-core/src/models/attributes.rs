//! Delivery attributes (checkout/cart order-attribute payload)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

/// Order-level delivery state pushed to the platform attribute store on
/// every change.
///
/// Not authoritative: the server-side cart is the source of truth and can
/// reject or override any of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAttributes {
    #[serde(default)]
    pub delivery_location: Option<String>,
    /// Display-formatted date string, e.g. "Monday, 10 August 2026" — the
    /// platform round-trips this exact string, not an ISO date
    #[serde(default)]
    pub delivery_day: Option<String>,
    /// Title of the selected hour slot
    #[serde(default)]
    pub delivery_hours: Option<String>,
    #[serde(default)]
    pub cart_subscription: bool,
    #[serde(default)]
    pub frequency_weeks: Option<u8>,
    #[serde(default)]
    pub is_same_day_delivery: bool,
    #[serde(default)]
    pub is_next_day_delivery: bool,
}

impl DeliveryAttributes {
    /// Selected delivery day, if one is stored and still parseable
    pub fn selected_day(&self) -> Option<NaiveDate> {
        self.delivery_day
            .as_deref()
            .and_then(|s| parse_delivery_day(s).ok())
    }
}

/// Format a date the way the storefront renders day chips
pub fn format_delivery_day(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}

/// Parse a stored `delivery_day` attribute back into a date.
///
/// Whitespace is normalized first: stored values occasionally carry doubled
/// spaces from the old string concatenation.
pub fn parse_delivery_day(raw: &str) -> ScheduleResult<NaiveDate> {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDate::parse_from_str(&normalized, "%A, %d %B %Y")
        .map_err(|_| ScheduleError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_delivery_day() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
        assert_eq!(format_delivery_day(date), "Monday, 10 August 2026");
        let single_digit = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        assert_eq!(format_delivery_day(single_digit), "Wednesday, 5 August 2026");
    }

    #[test]
    fn test_parse_round_trip() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        assert_eq!(parse_delivery_day(&format_delivery_day(date)).unwrap(), date);
    }

    #[test]
    fn test_parse_tolerates_doubled_spaces() {
        let date = parse_delivery_day("Monday,  10 August 2026").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 8, 10).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_delivery_day("next tuesday").is_err());
        assert!(parse_delivery_day("").is_err());
    }

    #[test]
    fn test_selected_day() {
        let attrs = DeliveryAttributes {
            delivery_day: Some("Monday, 10 August 2026".to_string()),
            ..Default::default()
        };
        assert_eq!(
            attrs.selected_day(),
            Some(NaiveDate::from_ymd_opt(2026, 8, 10).unwrap())
        );
        assert_eq!(DeliveryAttributes::default().selected_day(), None);
    }

    #[test]
    fn test_serde_shape() {
        let attrs = DeliveryAttributes {
            delivery_location: Some("Newtown, NSW, 2042, SYDNEY".to_string()),
            cart_subscription: true,
            frequency_weeks: Some(2),
            ..Default::default()
        };
        let json = serde_json::to_string(&attrs).unwrap();
        let back: DeliveryAttributes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, attrs);
    }
}
