//! The Dispatch Engine — spec.md §4.6, the core algorithm of the bus.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::callback_emitter::CallbackEmitter;
use super::handlers::TypeHandler;
use super::normalize::normalize_recipients;
use super::registry;
use crate::error::AppError;
use crate::models::{state, NewNotification, Notification, NotificationOutcome};
use crate::services::config_store::ConfigStore;

/// The raw admission payload — spec.md §6. This is also the wire format
/// placed on `notification_queue`: the admission handler publishes it
/// verbatim and the Task Worker deserializes the same shape back off the
/// queue before calling `save_notification`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionRequest {
    pub system: String,
    pub organisation: Option<String>,
    pub unique_identifier: Option<String>,
    pub notification_type: String,
    pub recipients: Vec<String>,
    pub template: Option<String>,
    pub context: JsonValue,
}

#[derive(Clone)]
pub struct DispatchEngine {
    config_store: ConfigStore,
    callback_emitter: CallbackEmitter,
}

impl DispatchEngine {
    pub fn new(config_store: ConfigStore, callback_emitter: CallbackEmitter) -> Self {
        Self {
            config_store,
            callback_emitter,
        }
    }

    /// Ingest, validate, resolve and persist — spec.md §4.6 `save_notification`.
    ///
    /// On a resolution/validation failure, emits a `failed` tenant callback
    /// if the System could be resolved, then returns the error. The caller
    /// (Task Worker or admission handler) must not retry the errors this
    /// returns — they are admission faults, not transient ones.
    pub async fn save_notification(
        &self,
        request: AdmissionRequest,
    ) -> Result<Notification, AppError> {
        let system_name = request.system.trim().to_lowercase();
        let notification_type = request.notification_type.trim().to_lowercase();
        let organisation_name = request.organisation.as_deref().map(|s| s.trim().to_lowercase());
        let template_name = request.template.as_deref().map(|s| s.trim().to_lowercase());
        let recipients = normalize_recipients(&notification_type, &request.recipients);

        if recipients.is_empty() {
            return Err(AppError::BadRequest {
                message: "recipients must be a non-empty list".to_string(),
            });
        }

        let system = match self.config_store.find_system(&system_name).await? {
            Some(system) => system,
            None => {
                return Err(AppError::NotFound {
                    entity: "system".to_string(),
                    field: "name".to_string(),
                    value: system_name,
                });
            }
        };

        let organisation_id = match organisation_name {
            Some(name) => match self.config_store.find_organisation(&name).await? {
                Some(org) => Some(org.id),
                None => {
                    self.emit_failure_callback(&system, &request.unique_identifier, "organisation not found")
                        .await;
                    return Err(AppError::NotFound {
                        entity: "organisation".to_string(),
                        field: "name".to_string(),
                        value: name,
                    });
                }
            },
            None => None,
        };

        let ntype = match self
            .config_store
            .find_notification_type(&notification_type)
            .await?
        {
            Some(ntype) => ntype,
            None => {
                self.emit_failure_callback(
                    &system,
                    &request.unique_identifier,
                    "notification_type not found",
                )
                .await;
                return Err(AppError::NotFound {
                    entity: "notification_type".to_string(),
                    field: "name".to_string(),
                    value: notification_type,
                });
            }
        };

        let template_id = match template_name {
            Some(name) => match self.config_store.find_template(&name).await? {
                Some(template) => Some(template.id),
                None => None,
            },
            None => None,
        };

        let pending_state = self.resolve_reserved_state(state::PENDING).await?;

        let new_notification = NewNotification {
            system_id: system.id,
            organisation_id,
            unique_identifier: request.unique_identifier.clone(),
            notification_type_id: ntype.id,
            recipients: serde_json::to_value(&recipients).unwrap_or(JsonValue::Null),
            template_id,
            context: request.context.clone(),
            status_id: pending_state.id,
        };

        self.config_store.create_notification(new_notification).await
    }

    /// Render and fan out over providers — spec.md §4.6 `send_notification`.
    pub async fn send_notification(&self, notification: Notification) -> Result<(), AppError> {
        let system = self
            .config_store
            .find_system_by_id(notification.system_id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "system".to_string(),
                field: "id".to_string(),
                value: notification.system_id.to_string(),
            })?;

        let ntype = self
            .config_store
            .find_notification_type_by_id(notification.notification_type_id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "notification_type".to_string(),
                field: "id".to_string(),
                value: notification.notification_type_id.to_string(),
            })?;

        let Some(handler) = TypeHandler::for_type_name(&ntype.name) else {
            return self
                .fail_notification(&notification, &system, "unknown notification type")
                .await;
        };

        let template = match notification.template_id {
            Some(id) => self.config_store.find_template_by_id(id).await?,
            None => None,
        };

        let recipients = notification.recipient_strings();

        if let Err(error) = handler.validate(&recipients, template.as_ref(), &notification.context) {
            return self
                .fail_notification(&notification, &system, &error.to_string())
                .await;
        }

        let active_providers = self
            .config_store
            .active_providers_for_type(notification.notification_type_id)
            .await?;

        if active_providers.is_empty() {
            return self
                .fail_notification(&notification, &system, "no active providers configured")
                .await;
        }

        let mut content = handler.prepare_content(&system.name, template.as_ref(), &notification.context);
        if let Some(obj) = content.as_object_mut() {
            obj.insert(
                "unique_identifier".to_string(),
                notification
                    .unique_identifier
                    .clone()
                    .map(JsonValue::String)
                    .unwrap_or(JsonValue::Null),
            );
            // The correlator a Belio-style provider echoes back on the inbound
            // callback is the ledger row's own id, not the tenant-supplied
            // `unique_identifier` — see spec.md §8 scenario 4.
            obj.insert(
                "notification_id".to_string(),
                JsonValue::String(notification.id.to_string()),
            );
        }

        for provider in active_providers {
            let adapter = match registry::instantiate(&provider.class_name, provider.config.clone()) {
                Ok(adapter) => adapter,
                Err(error) => {
                    tracing::error!(provider = %provider.name, error = %error, "provider class lookup failed");
                    continue;
                }
            };

            if !adapter.validate_config() {
                tracing::warn!(provider = %provider.name, "provider failed config validation, skipping");
                continue;
            }

            let outcome = adapter.send(&recipients, &content).await;
            if outcome == super::provider::DeliveryState::Failed {
                continue;
            }

            let sent_state = self.resolve_reserved_state(outcome.state_name()).await?;
            let sent_time = matches!(outcome, super::provider::DeliveryState::Sent).then(Utc::now);

            self.config_store
                .apply_outcome(
                    notification.id,
                    NotificationOutcome {
                        status_id: Some(sent_state.id),
                        provider_id: Some(provider.id),
                        sent_time,
                    },
                )
                .await?;

            self.callback_emitter
                .emit(&system, notification.id, &request_identifier(&notification), outcome.state_name(), None, sent_time)
                .await;

            return Ok(());
        }

        self.fail_notification(&notification, &system, "Notification not sent").await
    }

    async fn fail_notification(
        &self,
        notification: &Notification,
        system: &crate::models::System,
        message: &str,
    ) -> Result<(), AppError> {
        let failed_state = self.resolve_reserved_state(state::FAILED).await?;

        self.config_store
            .apply_outcome(
                notification.id,
                NotificationOutcome {
                    status_id: Some(failed_state.id),
                    provider_id: None,
                    sent_time: None,
                },
            )
            .await?;

        self.callback_emitter
            .emit(
                system,
                notification.id,
                &request_identifier(notification),
                state::FAILED,
                Some(message.to_string()),
                None,
            )
            .await;

        Ok(())
    }

    async fn emit_failure_callback(
        &self,
        system: &crate::models::System,
        unique_identifier: &Option<String>,
        message: &str,
    ) {
        // spec.md §4.6 step 5: this admission-failure callback carries a
        // lowercase "failed" status, distinct from the `State.name`
        // ("Failed") the send-path callbacks report.
        self.callback_emitter
            .emit(
                system,
                Uuid::nil(),
                unique_identifier.as_deref().unwrap_or_default(),
                "failed",
                Some(message.to_string()),
                None,
            )
            .await;
    }

    async fn resolve_reserved_state(&self, name: &str) -> Result<crate::models::State, AppError> {
        self.config_store.find_state(name).await?.ok_or_else(|| AppError::Configuration {
            key: "state".to_string(),
            source: anyhow::anyhow!("reserved state '{}' is not seeded", name),
        })
    }

}

fn request_identifier(notification: &Notification) -> String {
    notification.unique_identifier.clone().unwrap_or_default()
}
