//! `AfricasTalkingSMSProvider` adapter — spec.md §4.3.
//!
//! Form-encoded POST to the Africa's Talking SMS endpoint. `Sent` on a 2xx
//! API response, `Failed` otherwise.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use super::provider::{DeliveryState, ProviderAdapter};
use crate::external::client::HTTP_CLIENT;

const SEND_URL: &str = "https://api.africastalking.com/version1/messaging";

pub struct AfricasTalkingSmsProvider {
    config: JsonValue,
}

impl AfricasTalkingSmsProvider {
    pub fn new(config: JsonValue) -> Self {
        Self { config }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(JsonValue::as_str)
    }
}

#[async_trait]
impl ProviderAdapter for AfricasTalkingSmsProvider {
    fn validate_config(&self) -> bool {
        let required = ["username", "api_key"];
        let missing: Vec<&str> = required
            .iter()
            .filter(|key| self.config.get(**key).is_none())
            .copied()
            .collect();

        if !missing.is_empty() {
            tracing::warn!(
                provider = "AfricasTalkingSMSProvider",
                missing = ?missing,
                "provider config missing required keys"
            );
            return false;
        }
        true
    }

    async fn send(&self, recipients: &[String], content: &JsonValue) -> DeliveryState {
        let Some(username) = self.str_field("username") else {
            return DeliveryState::Failed;
        };
        let Some(api_key) = self.str_field("api_key") else {
            return DeliveryState::Failed;
        };
        let body = content.get("body").and_then(JsonValue::as_str).unwrap_or("");

        let mut form = vec![
            ("username", username.to_string()),
            ("to", recipients.join(",")),
            ("message", body.to_string()),
        ];
        if let Some(sender_id) = self.str_field("sender_id") {
            form.push(("from", sender_id.to_string()));
        }

        let response = HTTP_CLIENT
            .post(SEND_URL)
            .header("apiKey", api_key)
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => DeliveryState::Sent,
            Ok(resp) => {
                tracing::warn!(status = %resp.status(), "africa's talking rejected the send");
                DeliveryState::Failed
            }
            Err(error) => {
                tracing::error!(error = %error, "africa's talking send failed");
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
    fn validate_config_requires_username_and_api_key() {
        let provider = AfricasTalkingSmsProvider::new(json!({"username": "sandbox"}));
        assert!(!provider.validate_config());

        let provider =
            AfricasTalkingSmsProvider::new(json!({"username": "sandbox", "api_key": "k"}));
        assert!(provider.validate_config());
    }
}
