//! The provider adapter contract — spec.md §4.3.
//!
//! Adapters are stateless between calls; any connection or SDK
//! initialization happens inside `send`. Adapters MUST NOT mutate the
//! ledger — persisting the outcome is the Dispatch Engine's job.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::models::state;

/// The outcome an adapter hands back to the Dispatch Engine. Named after the
/// reserved `State` rows so a `DeliveryState` maps 1:1 onto a ledger status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryState {
    /// The third party acknowledged successful delivery synchronously.
    Sent,
    /// The third party accepted the request but will report delivery later.
    ConfirmationPending,
    /// The send was rejected or raised an error.
    Failed,
}

impl DeliveryState {
    /// The reserved `state.name` this outcome persists as.
    pub fn state_name(self) -> &'static str {
        match self {
            DeliveryState::Sent => state::SENT,
            DeliveryState::ConfirmationPending => state::CONFIRMATION_PENDING,
            DeliveryState::Failed => state::FAILED,
        }
    }
}

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Verifies the presence of the documented config keys, logging which
    /// are missing. Never returns an error — a misconfigured provider is
    /// skipped, not fatal, unless it's the last option (spec.md §4.6).
    fn validate_config(&self) -> bool;

    /// Attempts delivery to every recipient with the rendered content.
    async fn send(&self, recipients: &[String], content: &JsonValue) -> DeliveryState;
}
