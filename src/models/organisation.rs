//! Optional sub-tenant of a System.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::organisation)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Organisation {
    pub id: Uuid,
    pub system_id: Uuid,
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::organisation)]
pub struct NewOrganisation {
    pub system_id: Uuid,
    pub name: String,
}
