//! Tenant (System) model.
//!
//! Configuration entities are created/edited out-of-band via the
//! administrative collaborator (out of scope for this core) and read by the
//! Dispatch Engine and Callback Emitter.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Callback delivery mode for a tenant.
pub const CALLBACK_TYPE_WEBHOOK: &str = "webhook";
pub const CALLBACK_TYPE_QUEUE: &str = "queue";

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::system)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct System {
    pub id: Uuid,
    pub name: String,
    pub email_signature: Option<String>,
    pub sms_signature: Option<String>,
    pub default_from_email: Option<String>,
    pub callback_type: String,
    pub webhook_url: Option<String>,
    pub webhook_auth_token: Option<String>,
    pub queue_name: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl System {
    /// Resolved queue name, falling back to `<name>_queue` per spec.md §4.8.
    pub fn resolved_queue_name(&self) -> String {
        self.queue_name
            .clone()
            .unwrap_or_else(|| format!("{}_queue", self.name))
    }

    /// Routing key tenant callbacks are published with: `<name>.handle_notification_response`.
    pub fn callback_routing_key(&self) -> String {
        format!("{}.handle_notification_response", self.name)
    }
}

#[derive(Debug, Insertable, Deserialize, Clone, Validate)]
#[diesel(table_name = crate::schema::system)]
pub struct NewSystem {
    pub name: String,
    pub email_signature: Option<String>,
    pub sms_signature: Option<String>,
    #[validate(email)]
    pub default_from_email: Option<String>,
    pub callback_type: String,
    pub webhook_url: Option<String>,
    pub webhook_auth_token: Option<String>,
    pub queue_name: Option<String>,
}

#[derive(Debug, AsChangeset, Deserialize, Clone, Default)]
#[diesel(table_name = crate::schema::system)]
pub struct UpdateSystem {
    pub email_signature: Option<String>,
    pub sms_signature: Option<String>,
    pub default_from_email: Option<String>,
    pub callback_type: Option<String>,
    pub webhook_url: Option<String>,
    pub webhook_auth_token: Option<String>,
    pub queue_name: Option<String>,
}
