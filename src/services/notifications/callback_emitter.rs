//! Callback Emitter — spec.md §4.8. Reports the terminal (or intermediate)
//! outcome of a notification back to the owning tenant, either over a
//! webhook or its own AMQP queue. Both delivery modes are best-effort: a
//! failure here is logged and swallowed, never propagated to the caller.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::amqp::AmqpPublisher;
use crate::external::client::HTTP_CLIENT;
use crate::models::system::{CALLBACK_TYPE_QUEUE, CALLBACK_TYPE_WEBHOOK};
use crate::models::System;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct CallbackEmitter {
    publisher: Option<Arc<AmqpPublisher>>,
}

impl CallbackEmitter {
    pub fn new(publisher: Option<Arc<AmqpPublisher>>) -> Self {
        Self { publisher }
    }

    /// Sends a `{notification_id, unique_identifier, status, message, sent_time}`
    /// report to the tenant via its configured `callback_type`.
    pub async fn emit(
        &self,
        system: &System,
        notification_id: Uuid,
        unique_identifier: &str,
        status: &str,
        message: Option<String>,
        sent_time: Option<DateTime<Utc>>,
    ) {
        let body = json!({
            "notification_id": notification_id,
            "unique_identifier": unique_identifier,
            "status": status,
            "message": message,
            "sent_time": sent_time,
        });

        match system.callback_type.as_str() {
            CALLBACK_TYPE_WEBHOOK => self.emit_webhook(system, &body).await,
            CALLBACK_TYPE_QUEUE => self.emit_queue(system, &body).await,
            other => {
                tracing::warn!(system = %system.name, callback_type = other, "unknown callback_type, skipping");
            }
        }
    }

    async fn emit_webhook(&self, system: &System, body: &serde_json::Value) {
        let Some(url) = system.webhook_url.as_deref() else {
            tracing::warn!(system = %system.name, "callback_type is webhook but no webhook_url configured");
            return;
        };

        let mut request = HTTP_CLIENT.post(url).timeout(WEBHOOK_TIMEOUT).json(body);
        if let Some(token) = system.webhook_auth_token.as_deref() {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(response) if !response.status().is_success() => {
                tracing::error!(
                    system = %system.name,
                    status = %response.status(),
                    "webhook callback delivery returned non-2xx"
                );
            }
            Ok(_) => {}
            Err(error) => {
                tracing::error!(system = %system.name, error = %error, "webhook callback delivery failed");
            }
        }
    }

    async fn emit_queue(&self, system: &System, body: &serde_json::Value) {
        let Some(publisher) = self.publisher.as_ref() else {
            tracing::error!(system = %system.name, "callback_type is queue but no AMQP publisher is configured");
            return;
        };

        let payload = match serde_json::to_vec(body) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::error!(system = %system.name, error = %error, "failed to serialize callback payload");
                return;
            }
        };

        if let Err(error) = publisher.publish_tenant_callback(system, &payload).await {
            tracing::error!(system = %system.name, error = %error, "queue callback delivery failed");
        }
    }
}
