//! The ledger entry — the aggregate root of the dispatch bus.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value as JsonValue;
use uuid::Uuid;

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::notification)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Notification {
    pub id: Uuid,
    pub system_id: Uuid,
    pub organisation_id: Option<Uuid>,
    pub unique_identifier: Option<String>,
    pub notification_type_id: Uuid,
    pub recipients: JsonValue,
    pub template_id: Option<Uuid>,
    pub context: JsonValue,
    pub provider_id: Option<Uuid>,
    pub sent_time: Option<DateTime<Utc>>,
    pub status_id: Uuid,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl Notification {
    /// Recipients as normalized strings, flattening the JSON array column.
    pub fn recipient_strings(&self) -> Vec<String> {
        self.recipients
            .as_array()
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::notification)]
pub struct NewNotification {
    pub system_id: Uuid,
    pub organisation_id: Option<Uuid>,
    pub unique_identifier: Option<String>,
    pub notification_type_id: Uuid,
    pub recipients: JsonValue,
    pub template_id: Option<Uuid>,
    pub context: JsonValue,
    pub status_id: Uuid,
}

/// Patch applied when the Dispatch Engine or the Inbound Callback Handler
/// records a terminal (or intermediate, for `ConfirmationPending`) outcome.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::notification)]
pub struct NotificationOutcome {
    pub status_id: Option<Uuid>,
    pub provider_id: Option<Uuid>,
    pub sent_time: Option<DateTime<Utc>>,
}
