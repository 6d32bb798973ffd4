//! Notification category model (email / sms / push).
//!
//! Seeded once by a migration, same as [`crate::models::state::State`].

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

pub const EMAIL: &str = "email";
pub const SMS: &str = "sms";
pub const PUSH: &str = "push";

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::notification_type)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}
