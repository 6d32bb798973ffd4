//! AMQP transport — spec.md §6, grounded on `lapin`, the async-native Rust
//! client. The teacher has no AMQP dependency (its job queue is
//! Postgres-backed cron), so this module is new, added to carry the
//! dispatch queue and per-tenant callback queues idiomatically.

pub mod connection;
pub mod publisher;

pub use connection::establish_connection;
pub use publisher::AmqpPublisher;
