//! Provider catalog model: a configured third-party backend plus the
//! `class_name` that selects its adapter in the Provider Registry.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::provider)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Provider {
    pub id: Uuid,
    pub name: String,
    pub notification_type_id: Uuid,
    pub config: JsonValue,
    pub priority: Option<i32>,
    pub is_active: bool,
    pub class_name: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::provider)]
pub struct NewProvider {
    pub name: String,
    pub notification_type_id: Uuid,
    pub config: JsonValue,
    pub priority: Option<i32>,
    pub is_active: bool,
    pub class_name: String,
}
