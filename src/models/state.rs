//! Lifecycle state model.
//!
//! Reserved state names are seeded once by a migration (see
//! `migrations/2024-01-01-000000_create_notification_bus/up.sql`) rather than
//! created on demand at request time.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Reserved state name: a Notification has been persisted but not yet dispatched.
pub const PENDING: &str = "Pending";
/// Reserved state name: a provider acknowledged synchronous delivery.
pub const SENT: &str = "Sent";
/// Reserved state name: no provider could deliver the notification.
pub const FAILED: &str = "Failed";
/// Reserved state name: a provider accepted the request; final state arrives via callback.
pub const CONFIRMATION_PENDING: &str = "ConfirmationPending";

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::state)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct State {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}
