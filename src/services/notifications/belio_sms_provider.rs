//! `BelioSMSProvider` adapter — spec.md §4.3.
//!
//! Submits with correlator = the notification's ledger id and the adapter's
//! configured callback URL. Returns `ConfirmationPending` on a 2xx response —
//! the actual delivery state arrives later via the belio-sms callback
//! endpoint (spec.md §4.9), which matches `correlator` back to this id.

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

use super::provider::{DeliveryState, ProviderAdapter};
use crate::external::client::HTTP_CLIENT;

pub struct BelioSmsProvider {
    config: JsonValue,
}

impl BelioSmsProvider {
    pub fn new(config: JsonValue) -> Self {
        Self { config }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(JsonValue::as_str)
    }
}

#[async_trait]
impl ProviderAdapter for BelioSmsProvider {
    fn validate_config(&self) -> bool {
        let required = [
            "api_key",
            "cookie",
            "url",
            "default_sms_service_id",
            "callback_url",
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|key| self.config.get(**key).is_none())
            .copied()
            .collect();

        if !missing.is_empty() {
            tracing::warn!(
                provider = "BelioSMSProvider",
                missing = ?missing,
                "provider config missing required keys"
            );
            return false;
        }
        true
    }

    async fn send(&self, recipients: &[String], content: &JsonValue) -> DeliveryState {
        let (Some(api_key), Some(cookie), Some(url), Some(service_id), Some(callback_url)) = (
            self.str_field("api_key"),
            self.str_field("cookie"),
            self.str_field("url"),
            self.str_field("default_sms_service_id"),
            self.str_field("callback_url"),
        ) else {
            return DeliveryState::Failed;
        };

        let correlator = content
            .get("notification_id")
            .and_then(JsonValue::as_str)
            .unwrap_or_default();
        let body = content.get("body").and_then(JsonValue::as_str).unwrap_or("");

        let payload = json!({
            "serviceId": service_id,
            "recipients": recipients,
            "message": body,
            "deliveryReportRequest": {
                "correlator": correlator,
                "callbackUrl": callback_url,
            },
        });

        let response = HTTP_CLIENT
            .post(url)
            .header("X-Api-Key", api_key)
            .header("Cookie", cookie)
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => DeliveryState::ConfirmationPending,
            Ok(resp) => {
                tracing::warn!(status = %resp.status(), "belio rejected the send");
                DeliveryState::Failed
            }
            Err(error) => {
                tracing::error!(error = %error, "belio send failed");
                DeliveryState::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validate_config_requires_all_five_keys() {
        let provider = BelioSmsProvider::new(json!({"api_key": "k", "cookie": "c"}));
        assert!(!provider.validate_config());

        let provider = BelioSmsProvider::new(json!({
            "api_key": "k",
            "cookie": "c",
            "url": "https://belio.example/send",
            "default_sms_service_id": "1",
            "callback_url": "https://bus.example/belio-sms-callback/",
        }));
        assert!(provider.validate_config());
    }
}
