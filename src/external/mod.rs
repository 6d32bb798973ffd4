//! Shared outbound-HTTP infrastructure used by provider adapters and the
//! Callback Emitter.

pub mod client;
