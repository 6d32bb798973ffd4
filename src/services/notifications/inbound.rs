//! Inbound Callback Handler — spec.md §4.9. Reconciles an asynchronous
//! delivery report from a provider back-end (Belio-shaped) against the
//! ledger and re-emits the tenant callback.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::callback_emitter::CallbackEmitter;
use crate::error::AppError;
use crate::models::{state, NotificationOutcome};
use crate::services::config_store::ConfigStore;

const DELIVERED_TO_TERMINAL: &str = "DeliveredToTerminal";

/// A Belio-shaped delivery report: `{deliveryStatus, correlator, timestamp}`.
#[derive(Debug, Clone)]
pub struct DeliveryReport {
    pub delivery_status: String,
    pub correlator: Uuid,
    pub timestamp: DateTime<Utc>,
}

pub struct InboundCallbackHandler {
    config_store: ConfigStore,
    callback_emitter: CallbackEmitter,
}

impl InboundCallbackHandler {
    pub fn new(config_store: ConfigStore, callback_emitter: CallbackEmitter) -> Self {
        Self {
            config_store,
            callback_emitter,
        }
    }

    /// Matches `correlator` to a Notification id, persists the reconciled
    /// state and re-emits the tenant callback — spec.md §4.9 steps 1-4.
    pub async fn reconcile(&self, report: DeliveryReport) -> Result<(), AppError> {
        let notification = self
            .config_store
            .find_notification(report.correlator)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "notification".to_string(),
                field: "id".to_string(),
                value: report.correlator.to_string(),
            })?;

        let (state_name, sent_time) = if report.delivery_status == DELIVERED_TO_TERMINAL {
            (state::SENT, Some(report.timestamp))
        } else {
            (state::FAILED, None)
        };

        let resolved_state = self
            .config_store
            .find_state(state_name)
            .await?
            .ok_or_else(|| AppError::Configuration {
                key: "state".to_string(),
                source: anyhow::anyhow!("reserved state '{}' is not seeded", state_name),
            })?;

        self.config_store
            .apply_outcome(
                notification.id,
                NotificationOutcome {
                    status_id: Some(resolved_state.id),
                    provider_id: None,
                    sent_time,
                },
            )
            .await?;

        let system = self
            .config_store
            .find_system_by_id(notification.system_id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "system".to_string(),
                field: "id".to_string(),
                value: notification.system_id.to_string(),
            })?;

        let message = (state_name == state::FAILED)
            .then(|| format!("provider reported delivery status '{}'", report.delivery_status));

        self.callback_emitter
            .emit(
                &system,
                notification.id,
                notification.unique_identifier.as_deref().unwrap_or_default(),
                state_name,
                message,
                sent_time,
            )
            .await;

        Ok(())
    }
}
