//! Publishes onto the dispatch queue (admission layer) and tenant callback
//! queues (Callback Emitter) — spec.md §4.8, §6.

use lapin::options::{BasicPublishOptions, ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ExchangeKind};

use crate::error::AppError;
use crate::models::System;

/// Topic exchange tenant callback queues bind to, keyed by
/// `<system>.handle_notification_response` routing keys.
const CALLBACK_EXCHANGE: &str = "notification.callbacks";

#[derive(Clone)]
pub struct AmqpPublisher {
    channel: Channel,
}

impl AmqpPublisher {
    pub async fn new(connection: &Connection) -> Result<Self, AppError> {
        let channel = connection.create_channel().await.map_err(|error| AppError::Amqp {
            operation: "create_channel".to_string(),
            source: anyhow::Error::from(error),
        })?;

        channel
            .exchange_declare(
                CALLBACK_EXCHANGE,
                ExchangeKind::Topic,
                ExchangeDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|error| AppError::Amqp {
                operation: "exchange_declare".to_string(),
                source: anyhow::Error::from(error),
            })?;

        Ok(Self { channel })
    }

    /// Publishes an admission payload onto the dispatch queue, declaring it
    /// durable on first use. Persistent delivery mode so a broker restart
    /// does not drop a queued notification.
    pub async fn publish_dispatch(&self, queue_name: &str, payload: &[u8]) -> Result<(), AppError> {
        self.channel
            .queue_declare(
                queue_name,
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|error| AppError::Amqp {
                operation: "queue_declare".to_string(),
                source: anyhow::Error::from(error),
            })?;

        self.channel
            .basic_publish(
                "",
                queue_name,
                BasicPublishOptions::default(),
                payload,
                BasicProperties::default().with_delivery_mode(2),
            )
            .await
            .map_err(|error| AppError::Amqp {
                operation: "basic_publish".to_string(),
                source: anyhow::Error::from(error),
            })?
            .await
            .map_err(|error| AppError::Amqp {
                operation: "publisher_confirm".to_string(),
                source: anyhow::Error::from(error),
            })?;

        Ok(())
    }

    /// Publishes a tenant callback to `<system>_queue`, bound on the shared
    /// callback exchange with routing key `<system>.handle_notification_response`.
    pub async fn publish_tenant_callback(&self, system: &System, payload: &[u8]) -> Result<(), AppError> {
        let queue_name = system.resolved_queue_name();
        let routing_key = system.callback_routing_key();

        self.channel
            .queue_declare(
                &queue_name,
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|error| AppError::Amqp {
                operation: "queue_declare".to_string(),
                source: anyhow::Error::from(error),
            })?;

        self.channel
            .queue_bind(
                &queue_name,
                CALLBACK_EXCHANGE,
                &routing_key,
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|error| AppError::Amqp {
                operation: "queue_bind".to_string(),
                source: anyhow::Error::from(error),
            })?;

        self.channel
            .basic_publish(
                CALLBACK_EXCHANGE,
                &routing_key,
                BasicPublishOptions::default(),
                payload,
                BasicProperties::default().with_delivery_mode(2),
            )
            .await
            .map_err(|error| AppError::Amqp {
                operation: "basic_publish".to_string(),
                source: anyhow::Error::from(error),
            })?
            .await
            .map_err(|error| AppError::Amqp {
                operation: "publisher_confirm".to_string(),
                source: anyhow::Error::from(error),
            })?;

        Ok(())
    }
}
