//! Notification dispatch: provider adapters, the registry that selects them,
//! per-type handlers, and the Dispatch Engine that ties them together —
//! spec.md §4.2-§4.9.

mod africas_talking_sms_provider;
mod belio_sms_provider;
pub mod callback_emitter;
pub mod dispatch_engine;
mod firebase_push_provider;
mod gmail_smtp_provider;
mod handlers;
pub mod inbound;
pub mod normalize;
pub mod provider;
pub mod registry;

pub use callback_emitter::CallbackEmitter;
pub use dispatch_engine::{AdmissionRequest, DispatchEngine};
pub use handlers::TypeHandler;
pub use inbound::{DeliveryReport, InboundCallbackHandler};
pub use provider::{DeliveryState, ProviderAdapter};
