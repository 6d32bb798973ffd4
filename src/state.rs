//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::amqp::AmqpPublisher;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// This struct is designed to be used with Axum's State extractor.
/// Cloning is cheap since Services, AsyncDbPool and AmqpPublisher all use
/// Arc (or an Arc-backed pool/channel handle) internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the database connection pool, used by health checks
    pub db_pool: AsyncDbPool,
    /// Shared AMQP publisher handle, used by the admission handler to
    /// enqueue onto the dispatch queue
    pub amqp_publisher: Arc<AmqpPublisher>,
    /// Name of the dispatch queue admission requests are published to
    pub dispatch_queue: String,
}

impl AppState {
    /// Creates a new AppState from a database connection pool and a shared
    /// AMQP publisher.
    ///
    /// Initializes all repositories and services from the provided pool.
    pub fn new(pool: AsyncDbPool, amqp_publisher: Arc<AmqpPublisher>, dispatch_queue: String) -> Self {
        let repos = Repositories::new(pool.clone());
        let services = Services::new(repos, amqp_publisher.clone());
        Self {
            services,
            db_pool: pool,
            amqp_publisher,
            dispatch_queue,
        }
    }
}
