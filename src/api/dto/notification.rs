//! Admission and callback DTOs — spec.md §6, §4.9.

use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::services::AdmissionRequest;

/// `POST /send-notification/` body. Validation here only checks JSON shape —
/// name resolution, recipient parsing and template rendering are the Dispatch
/// Engine's job (spec.md §4.6), not the admission handler's.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[schema(example = json!({
    "system": "b2c",
    "organisation": "acme",
    "unique_identifier": "order-4471",
    "notification_type": "sms",
    "recipients": "+254712345678, 254712345678",
    "template": "sms_otp",
    "context": {"code": "9271"}
}))]
pub struct SendNotificationRequest {
    #[validate(length(min = 1, message = "system is required"))]
    pub system: String,

    pub organisation: Option<String>,

    pub unique_identifier: Option<String>,

    #[validate(length(min = 1, message = "notification_type is required"))]
    pub notification_type: String,

    #[serde(deserialize_with = "deserialize_recipients")]
    #[schema(value_type = Object)]
    pub recipients: RecipientsField,

    pub template: Option<String>,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub context: JsonValue,
}

/// Wire-level `recipients`: either a comma-separated string or a JSON array.
/// Normalized into a `Vec<String>` here; per-type cleanup (dedup, `+`
/// stripping, trimming) happens in `services::notifications::normalize`.
#[derive(Debug, Clone)]
pub struct RecipientsField(pub Vec<String>);

fn deserialize_recipients<'de, D>(deserializer: D) -> Result<RecipientsField, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Csv(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::List(items) => Ok(RecipientsField(items)),
        Raw::Csv(csv) => Ok(RecipientsField(csv.split(',').map(str::to_string).collect())),
    }
}

impl SendNotificationRequest {
    /// Converts the validated wire request into the Dispatch Engine's
    /// internal admission type.
    pub fn into_admission_request(self) -> AdmissionRequest {
        AdmissionRequest {
            system: self.system,
            organisation: self.organisation,
            unique_identifier: self.unique_identifier,
            notification_type: self.notification_type,
            recipients: self.recipients.0,
            template: self.template,
            context: self.context,
        }
    }
}

/// `{"code":"100.000.000","message":"..."}` / `{"code":"999.999.999","message":"..."}`
/// response shape, matching spec.md §6's "acceptance is synchronous only up
/// to enqueue".
#[derive(Debug, Serialize, ToSchema)]
pub struct AdmissionResponse {
    pub code: String,
    pub message: String,
}

impl AdmissionResponse {
    pub fn accepted() -> Self {
        Self {
            code: "100.000.000".to_string(),
            message: "Notification queued successfully".to_string(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            code: "999.999.999".to_string(),
            message: message.into(),
        }
    }
}

/// `POST /belio-sms-callback/` body — spec.md §4.9, `{deliveryStatus,
/// correlator, timestamp}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BelioCallbackRequest {
    #[serde(rename = "deliveryStatus")]
    pub delivery_status: String,
    pub correlator: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl From<BelioCallbackRequest> for crate::services::DeliveryReport {
    fn from(request: BelioCallbackRequest) -> Self {
        crate::services::DeliveryReport {
            delivery_status: request.delivery_status,
            correlator: request.correlator,
            timestamp: request.timestamp,
        }
    }
}

/// Generic `{"message": "..."}` response used by the callback endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
