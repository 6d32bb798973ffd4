//! Repository for the `provider` table.

use diesel::expression_methods::NullsOrderExtension;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewProvider, Provider};

#[derive(Clone)]
pub struct ProviderRepository {
    pool: AsyncDbPool,
}

impl ProviderRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_name(&self, provider_name: &str) -> Result<Option<Provider>, AppError> {
        use crate::schema::provider::dsl::*;
        let mut conn = self.pool.get().await?;

        provider
            .filter(name.eq(provider_name))
            .select(Provider::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, provider_id: Uuid) -> Result<Option<Provider>, AppError> {
        use crate::schema::provider::dsl::*;
        let mut conn = self.pool.get().await?;

        provider
            .filter(id.eq(provider_id))
            .select(Provider::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// All active providers for a notification type, ordered by `priority`
    /// ascending with nulls last, tie-broken by creation time descending —
    /// per spec.md §4.5.
    pub async fn active_providers_for_type(
        &self,
        type_id: Uuid,
    ) -> Result<Vec<Provider>, AppError> {
        use crate::schema::provider::dsl::*;
        let mut conn = self.pool.get().await?;

        provider
            .filter(notification_type_id.eq(type_id))
            .filter(is_active.eq(true))
            .order((priority.asc().nulls_last(), date_created.desc()))
            .select(Provider::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn create(&self, new_provider: NewProvider) -> Result<Provider, AppError> {
        use crate::schema::provider::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(provider)
            .values(&new_provider)
            .returning(Provider::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
