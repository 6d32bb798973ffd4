//! Repository for the `system` (tenant) table.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewSystem, System, UpdateSystem};

#[derive(Clone)]
pub struct SystemRepository {
    pool: AsyncDbPool,
}

impl SystemRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Looks up a tenant by its unique, lowercase name.
    pub async fn find_by_name(&self, system_name: &str) -> Result<Option<System>, AppError> {
        use crate::schema::system::dsl::*;
        let mut conn = self.pool.get().await?;

        system
            .filter(name.eq(system_name))
            .select(System::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, system_id: Uuid) -> Result<Option<System>, AppError> {
        use crate::schema::system::dsl::*;
        let mut conn = self.pool.get().await?;

        system
            .filter(id.eq(system_id))
            .select(System::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn create(&self, new_system: NewSystem) -> Result<System, AppError> {
        use crate::schema::system::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(system)
            .values(&new_system)
            .returning(System::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn update(&self, system_id: Uuid, patch: UpdateSystem) -> Result<System, AppError> {
        use crate::schema::system::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(system.filter(id.eq(system_id)))
            .set((&patch, date_modified.eq(diesel::dsl::now)))
            .returning(System::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
