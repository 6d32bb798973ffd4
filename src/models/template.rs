//! Rendering template model.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::template)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub notification_type_id: Uuid,
    pub subject: String,
    pub body: String,
    pub is_active: bool,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::template)]
pub struct NewTemplate {
    pub name: String,
    pub notification_type_id: Uuid,
    pub subject: String,
    pub body: String,
    pub is_active: bool,
}
