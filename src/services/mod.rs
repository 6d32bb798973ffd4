//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories, the config store, and the notification dispatch pipeline.

pub mod config_store;
pub mod notifications;
pub mod template_renderer;

pub use config_store::ConfigStore;
pub use notifications::{
    AdmissionRequest, CallbackEmitter, DeliveryReport, DispatchEngine, InboundCallbackHandler,
};

use std::sync::Arc;

use crate::amqp::AmqpPublisher;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools and the AMQP channel use `Arc`
/// internally.
#[derive(Clone)]
pub struct Services {
    pub config_store: ConfigStore,
    pub dispatch_engine: DispatchEngine,
    pub callback_emitter: CallbackEmitter,
    pub inbound: Arc<InboundCallbackHandler>,
}

impl Services {
    /// Creates a new Services instance from Repositories and an AMQP
    /// publisher handle shared with the Task Worker.
    pub fn new(repos: Repositories, amqp_publisher: Arc<AmqpPublisher>) -> Self {
        let config_store = ConfigStore::new(repos);
        let callback_emitter = CallbackEmitter::new(Some(amqp_publisher));
        let dispatch_engine = DispatchEngine::new(config_store.clone(), callback_emitter.clone());
        let inbound = InboundCallbackHandler::new(config_store.clone(), callback_emitter.clone());

        Self {
            config_store,
            dispatch_engine,
            callback_emitter,
            inbound: Arc::new(inbound),
        }
    }
}
