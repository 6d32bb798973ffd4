//! Repository for the `organisation` table (optional sub-tenant of a System).

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewOrganisation, Organisation};

#[derive(Clone)]
pub struct OrganisationRepository {
    pool: AsyncDbPool,
}

impl OrganisationRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Looks up an organisation by its unique, lowercase name.
    pub async fn find_by_name(&self, org_name: &str) -> Result<Option<Organisation>, AppError> {
        use crate::schema::organisation::dsl::*;
        let mut conn = self.pool.get().await?;

        organisation
            .filter(name.eq(org_name))
            .select(Organisation::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, org_id: Uuid) -> Result<Option<Organisation>, AppError> {
        use crate::schema::organisation::dsl::*;
        let mut conn = self.pool.get().await?;

        organisation
            .filter(id.eq(org_id))
            .select(Organisation::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn create(&self, new_org: NewOrganisation) -> Result<Organisation, AppError> {
        use crate::schema::organisation::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(organisation)
            .values(&new_org)
            .returning(Organisation::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
