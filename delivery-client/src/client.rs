//! HTTP client for the hosted storefront data endpoints

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use schedule_core::models::DeliveryScheduleDocument;

/// Async source of schedule documents; the seam for tests and offline
/// callers
#[async_trait::async_trait]
pub trait ScheduleSource: Send + Sync {
    async fn fetch_schedule(&self) -> ClientResult<DeliveryScheduleDocument>;
}

/// HTTP data client
#[derive(Debug, Clone)]
pub struct ScheduleClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ScheduleClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::InvalidResponse(format!(
                "{} returned {}",
                url, status
            )));
        }
        Ok(response.json::<T>().await?)
    }

    /// Fetch the delivery-data document
    pub async fn fetch_schedule(&self) -> ClientResult<DeliveryScheduleDocument> {
        self.get_json(&self.config.delivery_data_url, &[]).await
    }

    /// Ask whether the customer already has an active subscription.
    ///
    /// Deployments without a subscriptions endpoint answer `false`; so do
    /// lookups the endpoint itself marks unsuccessful.
    pub async fn has_active_subscriptions(&self, email: &str) -> ClientResult<bool> {
        let Some(url) = &self.config.subscriptions_url else {
            return Ok(false);
        };
        let response: SubscriptionCheckResponse =
            self.get_json(url, &[("email", email)]).await?;
        if response.success {
            Ok(response.has_active_subscriptions)
        } else {
            tracing::debug!(
                reason = %response.message,
                "Subscription lookup unsuccessful"
            );
            Ok(false)
        }
    }
}

#[async_trait::async_trait]
impl ScheduleSource for ScheduleClient {
    async fn fetch_schedule(&self) -> ClientResult<DeliveryScheduleDocument> {
        ScheduleClient::fetch_schedule(self).await
    }
}

/// Wire response of the active-subscription lookup
#[derive(Debug, Deserialize)]
struct SubscriptionCheckResponse {
    success: bool,
    #[serde(rename = "hasActiveSubscriptions", default)]
    has_active_subscriptions: bool,
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_subscription_endpoint_answers_false() {
        let client = ScheduleClient::new(ClientConfig::new("https://example.com/delivery.json"));
        assert!(
            !client
                .has_active_subscriptions("customer@example.com")
                .await
                .unwrap()
        );
    }

    #[test]
    fn test_subscription_response_shape() {
        let response: SubscriptionCheckResponse = serde_json::from_str(
            r#"{"success": true, "hasActiveSubscriptions": true, "message": ""}"#,
        )
        .unwrap();
        assert!(response.success);
        assert!(response.has_active_subscriptions);

        let minimal: SubscriptionCheckResponse =
            serde_json::from_str(r#"{"success": false, "message": "not found"}"#).unwrap();
        assert!(!minimal.has_active_subscriptions);
        assert_eq!(minimal.message, "not found");
    }
}
