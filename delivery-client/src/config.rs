//! Deployment configuration

use anyhow::Context;
use schedule_core::{BlackoutDates, OffsetMode};
use serde::{Deserialize, Serialize};

/// Regions on a near-daily schedule; they get the six-chip day layout
pub const SEVEN_DAY_REGIONS: [&str; 7] = [
    "MEL METRO",
    "MELBOURNE REGIONAL",
    "BNE METRO",
    "SYDNEY",
    "SYD REGIONAL",
    "SYD SOUTHWEST",
    "GOLD COAST",
];

/// How many delivery dates the calculator produces per request
pub const DEFAULT_DELIVERY_DAYS: usize = 10;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// URL of the hosted delivery-data JSON document
    pub delivery_data_url: String,
    /// Endpoint answering the active-subscription lookup, if deployed
    #[serde(default)]
    pub subscriptions_url: Option<String>,
    /// Timezone reconciliation behavior
    #[serde(default)]
    pub offset_mode: OffsetMode,
    /// Number of candidate dates to compute
    #[serde(default = "default_delivery_days")]
    pub delivery_days_to_get: usize,
    /// Blackout dates in `D.M.YYYY` form
    #[serde(default)]
    pub blackout_dates: Vec<String>,
    /// Region names rendered with the six-chip layout
    #[serde(default = "default_seven_day_regions")]
    pub seven_day_regions: Vec<String>,
    /// Days the billing date precedes the cutoff for subscription orders
    #[serde(default)]
    pub payment_lead_days: u8,
    /// Premium meal-plan deployment: dates start five days out
    #[serde(default)]
    pub premium_plan: bool,
}

fn default_delivery_days() -> usize {
    DEFAULT_DELIVERY_DAYS
}

fn default_seven_day_regions() -> Vec<String> {
    SEVEN_DAY_REGIONS.iter().map(|s| s.to_string()).collect()
}

impl ClientConfig {
    pub fn new(delivery_data_url: impl Into<String>) -> Self {
        Self {
            delivery_data_url: delivery_data_url.into(),
            subscriptions_url: None,
            offset_mode: OffsetMode::default(),
            delivery_days_to_get: DEFAULT_DELIVERY_DAYS,
            blackout_dates: Vec::new(),
            seven_day_regions: default_seven_day_regions(),
            payment_lead_days: 0,
            premium_plan: false,
        }
    }

    /// Read configuration from the environment (`.env` honored)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let delivery_data_url =
            std::env::var("DELIVERY_DATA_URL").context("DELIVERY_DATA_URL is not set")?;
        let mut config = Self::new(delivery_data_url);
        if let Ok(url) = std::env::var("SUBSCRIPTIONS_URL") {
            config.subscriptions_url = Some(url);
        }
        if let Ok(raw) = std::env::var("DELIVERY_DAYS_TO_GET") {
            config.delivery_days_to_get = raw
                .parse()
                .context("DELIVERY_DAYS_TO_GET must be a number")?;
        }
        if let Ok(raw) = std::env::var("DELIVERY_BLACKOUT_DATES") {
            config.blackout_dates = raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        Ok(config)
    }

    pub fn is_seven_day_region(&self, region_name: &str) -> bool {
        self.seven_day_regions
            .iter()
            .any(|name| name.eq_ignore_ascii_case(region_name))
    }

    /// Lead-time floor applied to computed dates
    pub fn min_lead_days(&self) -> u8 {
        if self.premium_plan { 5 } else { 0 }
    }

    /// Parsed blackout list
    pub fn blackouts(&self) -> BlackoutDates {
        BlackoutDates::from_strings(self.blackout_dates.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("https://example.com/delivery.json");
        assert_eq!(config.delivery_days_to_get, 10);
        assert_eq!(config.offset_mode, OffsetMode::Signed);
        assert_eq!(config.min_lead_days(), 0);
        assert!(config.blackouts().is_empty());
    }

    #[test]
    fn test_seven_day_region_match_is_case_insensitive() {
        let config = ClientConfig::new("https://example.com/delivery.json");
        assert!(config.is_seven_day_region("SYDNEY"));
        assert!(config.is_seven_day_region("Sydney"));
        assert!(!config.is_seven_day_region("HOBART"));
    }

    #[test]
    fn test_premium_plan_lead() {
        let mut config = ClientConfig::new("https://example.com/delivery.json");
        config.premium_plan = true;
        assert_eq!(config.min_lead_days(), 5);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"delivery_data_url": "https://example.com/delivery.json",
                "blackout_dates": ["29.12.2026", "1.1.2027"]}"#,
        )
        .unwrap();
        assert_eq!(config.blackouts().len(), 2);
        assert_eq!(config.seven_day_regions.len(), SEVEN_DAY_REGIONS.len());
    }
}
