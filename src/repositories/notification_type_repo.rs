//! Repository for the `notification_type` lookup table.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::NotificationType;

#[derive(Clone)]
pub struct NotificationTypeRepository {
    pool: AsyncDbPool,
}

impl NotificationTypeRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_name(&self, type_name: &str) -> Result<Option<NotificationType>, AppError> {
        use crate::schema::notification_type::dsl::*;
        let mut conn = self.pool.get().await?;

        notification_type
            .filter(name.eq(type_name))
            .select(NotificationType::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, type_id: uuid::Uuid) -> Result<Option<NotificationType>, AppError> {
        use crate::schema::notification_type::dsl::*;
        let mut conn = self.pool.get().await?;

        notification_type
            .filter(id.eq(type_id))
            .select(NotificationType::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}
