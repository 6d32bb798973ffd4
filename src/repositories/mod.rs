//! Repository layer for data access operations.
//!
//! Provides async CRUD operations for all domain entities, one repository
//! struct per table, per `crate::services::config_store::ConfigStore`.

mod notification_repo;
mod notification_type_repo;
mod organisation_repo;
mod provider_repo;
mod state_repo;
mod system_repo;
mod template_repo;

pub use notification_repo::NotificationRepository;
pub use notification_type_repo::NotificationTypeRepository;
pub use organisation_repo::OrganisationRepository;
pub use provider_repo::ProviderRepository;
pub use state_repo::StateRepository;
pub use system_repo::SystemRepository;
pub use template_repo::TemplateRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub states: StateRepository,
    pub notification_types: NotificationTypeRepository,
    pub systems: SystemRepository,
    pub organisations: OrganisationRepository,
    pub templates: TemplateRepository,
    pub providers: ProviderRepository,
    pub notifications: NotificationRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            states: StateRepository::new(pool.clone()),
            notification_types: NotificationTypeRepository::new(pool.clone()),
            systems: SystemRepository::new(pool.clone()),
            organisations: OrganisationRepository::new(pool.clone()),
            templates: TemplateRepository::new(pool.clone()),
            providers: ProviderRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool),
        }
    }
}
