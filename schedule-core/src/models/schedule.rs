//! Delivery schedule document (wire format)
//!
//! Shape of the hosted JSON the storefront fetches per deployment. Field
//! names follow the wire exactly; `serde` renames cover the camelCase keys.

use serde::{Deserialize, Serialize};

use super::rule::WeeklyDeliveryRule;

/// Root of the hosted delivery-data document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryScheduleDocument {
    pub general: GeneralSettings,
    pub regions: Vec<Region>,
}

/// Kitchen-wide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Kitchen UTC offset in minutes
    #[serde(rename = "time")]
    pub kitchen_offset_minutes: i32,
    /// Master list of delivery-hour options, referenced by region masks
    pub hours: Vec<HourOption>,
    /// Daily order cutoff as `[hour, minute, second]`
    pub cutoff_time: [u32; 3],
}

/// One selectable delivery-hour range from the master list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourOption {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// A named delivery area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    /// Serviceable address strings: "suburb, state, postcode, region-name"
    pub places: Vec<String>,
    /// Simple weekly schedule: `[cutoff_dow, delivery_dow]` rows (Sunday = 0)
    #[serde(default)]
    pub days: Option<Vec<[u8; 2]>>,
    /// Richer per-day schedule; takes precedence over `days` when present
    #[serde(rename = "regionDeliverySettings", default)]
    pub region_delivery_settings: Option<Vec<DaySetting>>,
    /// Truthy mask over `general.hours`: falsy entries are not offered here
    #[serde(default)]
    pub hours: Vec<serde_json::Value>,
}

/// Per-day entry of a region's rich schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySetting {
    /// Cutoff day of week (Sunday = 0)
    pub cutoff: u8,
    /// Delivery day of week (Sunday = 0)
    pub delivery: u8,
    #[serde(default)]
    pub allowed: bool,
    /// Same-day delivery offered on this day
    #[serde(rename = "sddAllowed", default)]
    pub sdd_allowed: bool,
    #[serde(rename = "deliveryHours", default)]
    pub delivery_hours: Vec<HourSlot>,
}

/// One delivery-hour slot with optional expedited cutoffs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourSlot {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "helpText", default)]
    pub help_text: String,
    #[serde(rename = "sddTitle", skip_serializing_if = "Option::is_none")]
    pub sdd_title: Option<String>,
    #[serde(rename = "sddHelpText", skip_serializing_if = "Option::is_none")]
    pub sdd_help_text: Option<String>,
    /// Same-day cutoff, `"HH:MM"`
    #[serde(rename = "sddCutoff", skip_serializing_if = "Option::is_none")]
    pub sdd_cutoff: Option<String>,
    /// Next-day cutoff, `"HH:MM"`
    #[serde(rename = "nddCutoff", skip_serializing_if = "Option::is_none")]
    pub ndd_cutoff: Option<String>,
}

impl Region {
    /// Weekly rules for date computation.
    ///
    /// Rows with out-of-range weekday indices are skipped with a warning;
    /// disallowed day entries are filtered so the date list and the hour
    /// list agree. A region can legitimately end up with zero rules — that
    /// is the "delivery not available" state, not an error.
    pub fn weekly_rules(&self) -> Vec<WeeklyDeliveryRule> {
        let mut rules = Vec::new();
        if let Some(settings) = &self.region_delivery_settings {
            for entry in settings {
                if !entry.allowed {
                    continue;
                }
                match WeeklyDeliveryRule::from_indices(entry.cutoff, entry.delivery) {
                    Some(rule) => rules.push(rule),
                    None => tracing::warn!(
                        region = %self.name,
                        cutoff = entry.cutoff,
                        delivery = entry.delivery,
                        "Skipping day entry with invalid weekday index"
                    ),
                }
            }
        } else if let Some(days) = &self.days {
            for row in days {
                match WeeklyDeliveryRule::from_indices(row[0], row[1]) {
                    Some(rule) => rules.push(rule),
                    None => tracing::warn!(
                        region = %self.name,
                        cutoff = row[0],
                        delivery = row[1],
                        "Skipping schedule row with invalid weekday index"
                    ),
                }
            }
        }
        rules
    }

    /// Hour options offered by this region, resolved against the master list
    pub fn offered_hours<'a>(&self, master: &'a [HourOption]) -> Vec<&'a HourOption> {
        self.hours
            .iter()
            .enumerate()
            .filter(|(_, mask)| truthy(mask))
            .filter_map(|(index, _)| master.get(index))
            .collect()
    }
}

/// JSON truthiness, as the storefront's mask entries rely on it
fn truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}
