//! Repository for the `notification` table — the ledger itself.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewNotification, Notification, NotificationOutcome};

#[derive(Clone)]
pub struct NotificationRepository {
    pool: AsyncDbPool,
}

impl NotificationRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Persists a new ledger entry in the `Pending` state.
    pub async fn create(&self, new_notification: NewNotification) -> Result<Notification, AppError> {
        use crate::schema::notification::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(notification)
            .values(&new_notification)
            .returning(Notification::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, notification_id: Uuid) -> Result<Option<Notification>, AppError> {
        use crate::schema::notification::dsl::*;
        let mut conn = self.pool.get().await?;

        notification
            .filter(id.eq(notification_id))
            .select(Notification::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Applies a terminal (or `ConfirmationPending`) outcome to a ledger row.
    pub async fn apply_outcome(
        &self,
        notification_id: Uuid,
        outcome: NotificationOutcome,
    ) -> Result<Notification, AppError> {
        use crate::schema::notification::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(notification.filter(id.eq(notification_id)))
            .set((&outcome, date_modified.eq(diesel::dsl::now)))
            .returning(Notification::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
