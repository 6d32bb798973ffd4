//! Facade over `Repositories` composing the per-entity lookups the Dispatch
//! Engine needs, case-folding names the way spec.md §4.1 requires.

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewNotification, Notification, NotificationOutcome, NotificationType, Organisation, Provider, State, System, Template};
use crate::repositories::Repositories;

#[derive(Clone)]
pub struct ConfigStore {
    repos: Repositories,
}

impl ConfigStore {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn find_system(&self, name: &str) -> Result<Option<System>, AppError> {
        self.repos.systems.find_by_name(&name.to_lowercase()).await
    }

    pub async fn find_system_by_id(&self, id: Uuid) -> Result<Option<System>, AppError> {
        self.repos.systems.find_by_id(id).await
    }

    pub async fn find_organisation(&self, name: &str) -> Result<Option<Organisation>, AppError> {
        self.repos
            .organisations
            .find_by_name(&name.to_lowercase())
            .await
    }

    pub async fn find_notification_type(
        &self,
        name: &str,
    ) -> Result<Option<NotificationType>, AppError> {
        self.repos
            .notification_types
            .find_by_name(&name.to_lowercase())
            .await
    }

    pub async fn find_notification_type_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<NotificationType>, AppError> {
        self.repos.notification_types.find_by_id(id).await
    }

    pub async fn find_template(&self, name: &str) -> Result<Option<Template>, AppError> {
        self.repos.templates.find_by_name(&name.to_lowercase()).await
    }

    pub async fn find_template_by_id(&self, id: Uuid) -> Result<Option<Template>, AppError> {
        self.repos.templates.find_by_id(id).await
    }

    pub async fn find_state(&self, name: &str) -> Result<Option<State>, AppError> {
        self.repos.states.find_by_name(name).await
    }

    pub async fn find_provider_by_id(&self, id: Uuid) -> Result<Option<Provider>, AppError> {
        self.repos.providers.find_by_id(id).await
    }

    pub async fn active_providers_for_type(
        &self,
        type_id: Uuid,
    ) -> Result<Vec<Provider>, AppError> {
        self.repos.providers.active_providers_for_type(type_id).await
    }

    pub async fn create_notification(
        &self,
        new_notification: NewNotification,
    ) -> Result<Notification, AppError> {
        self.repos.notifications.create(new_notification).await
    }

    pub async fn find_notification(&self, id: Uuid) -> Result<Option<Notification>, AppError> {
        self.repos.notifications.find_by_id(id).await
    }

    pub async fn apply_outcome(
        &self,
        id: Uuid,
        outcome: NotificationOutcome,
    ) -> Result<Notification, AppError> {
        self.repos.notifications.apply_outcome(id, outcome).await
    }
}
