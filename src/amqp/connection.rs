//! Connection setup shared by the admission publisher and the Task Worker.

use lapin::{Connection, ConnectionProperties};

use crate::config::settings::AmqpConfig;
use crate::error::AppError;

/// Opens a fresh AMQP connection using the configured credentials.
pub async fn establish_connection(config: &AmqpConfig) -> Result<Connection, AppError> {
    Connection::connect(&config.connection_uri(), ConnectionProperties::default())
        .await
        .map_err(|error| AppError::Amqp {
            operation: "connect".to_string(),
            source: anyhow::Error::from(error),
        })
}
