//! notify-bus library
//!
//! Core library modules for the multi-tenant notification dispatch bus.

pub mod amqp;
pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;
pub mod worker;

pub use state::AppState;

/// Crate version, used as the default `ApplicationConfig::version`.
pub fn pkg_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
