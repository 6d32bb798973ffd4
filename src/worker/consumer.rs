//! The Task Worker's AMQP consumer loop — spec.md §4.7.
//!
//! Pulls raw admission payloads off the dispatch queue, drives
//! `save_notification` then `send_notification`, and retries a job that
//! fails on a transient fault up to `worker_max_retries` times with a
//! constant `worker_retry_delay_seconds` backoff before dead-lettering it.
//! Concurrency is bounded in-process by `worker_concurrency`; horizontal
//! scaling is just running more `notify-bus worker` processes against the
//! same queue (spec.md §5).

use std::sync::Arc;

use futures::StreamExt;
use lapin::options::{BasicAckOptions, BasicConsumeOptions, BasicNackOptions, BasicQosOptions};
use lapin::types::FieldTable;
use tokio::sync::Semaphore;

use crate::amqp::{establish_connection, AmqpPublisher};
use crate::config::settings::Settings;
use crate::db::establish_async_connection_pool;
use crate::error::AppError;
use crate::repositories::Repositories;
use crate::services::{AdmissionRequest, DispatchEngine, Services};

/// Starts the Task Worker: connects to Postgres and the AMQP broker,
/// declares the dispatch queue, and consumes it until the process is
/// signalled to shut down.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        host = %settings.amqp.host,
        port = %settings.amqp.port,
        queue = %settings.amqp.dispatch_queue,
        concurrency = settings.amqp.worker_concurrency,
        "Task Worker starting"
    );

    let pool = establish_async_connection_pool(&settings.database).await?;
    let repos = Repositories::new(pool);

    let connection = establish_connection(&settings.amqp).await?;
    let publisher = Arc::new(AmqpPublisher::new(&connection).await?);
    let services = Services::new(repos, publisher);

    let channel = connection.create_channel().await.map_err(|error| AppError::Amqp {
        operation: "create_channel".to_string(),
        source: anyhow::Error::from(error),
    })?;

    channel
        .queue_declare(
            &settings.amqp.dispatch_queue,
            lapin::options::QueueDeclareOptions {
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

    channel
        .basic_qos(settings.amqp.worker_concurrency as u16, BasicQosOptions::default())
        .await
        .map_err(|error| AppError::Amqp {
            operation: "basic_qos".to_string(),
            source: anyhow::Error::from(error),
        })?;

    let mut consumer = channel
        .basic_consume(
            &settings.amqp.dispatch_queue,
            "notify-bus-worker",
            BasicConsumeOptions::default(),
            FieldTable::default(),
        )
        .await
        .map_err(|error| AppError::Amqp {
            operation: "basic_consume".to_string(),
            source: anyhow::Error::from(error),
        })?;

    tracing::info!(queue = %settings.amqp.dispatch_queue, "Task Worker consuming dispatch queue");

    let concurrency = usize::try_from(settings.amqp.worker_concurrency).unwrap_or(1).max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let max_retries = settings.amqp.worker_max_retries;
    let retry_delay = std::time::Duration::from_secs(settings.amqp.worker_retry_delay_seconds);

    while let Some(result) = consumer.next().await {
        let delivery = match result {
            Ok(delivery) => delivery,
            Err(error) => {
                tracing::error!(error = %error, "AMQP delivery error, continuing");
                continue;
            }
        };

        let permit = semaphore.clone().acquire_owned().await.expect("semaphore closed");
        let dispatch_engine = services.dispatch_engine.clone();

        tokio::spawn(async move {
            let _permit = permit;

            let outcome = match serde_json::from_slice::<AdmissionRequest>(&delivery.data) {
                Ok(request) => process_with_retry(&dispatch_engine, request, max_retries, retry_delay).await,
                Err(error) => {
                    tracing::error!(error = %error, "malformed admission payload, dropping");
                    JobOutcome::NonRetryable
                }
            };

            let ack_result = match outcome {
                JobOutcome::Succeeded | JobOutcome::NonRetryable => {
                    delivery.ack(BasicAckOptions::default()).await
                }
                JobOutcome::DeadLettered => {
                    delivery
                        .nack(BasicNackOptions {
                            requeue: false,
                            ..Default::default()
                        })
                        .await
                }
            };

            if let Err(error) = ack_result {
                tracing::error!(error = %error, "failed to ack/nack delivery");
            }
        });
    }

    tracing::info!("Task Worker consumer stream closed, shutting down");
    Ok(())
}

enum JobOutcome {
    Succeeded,
    /// An admission fault (bad request / unknown reference) — not retried,
    /// acknowledged so it does not block the queue.
    NonRetryable,
    /// Exhausted retries on a transient fault, dead-lettered.
    DeadLettered,
}

/// One job, at most `1 + max_retries` attempts, spec.md §4.7, §7 `Transient`.
async fn process_with_retry(
    dispatch_engine: &DispatchEngine,
    request: AdmissionRequest,
    max_retries: u32,
    retry_delay: std::time::Duration,
) -> JobOutcome {
    let mut attempt = 0;

    loop {
        match run_job(dispatch_engine, request.clone()).await {
            Ok(()) => return JobOutcome::Succeeded,
            Err(JobError::NonRetryable(error)) => {
                tracing::warn!(error = %error, system = %request.system, "admission fault, not retrying");
                return JobOutcome::NonRetryable;
            }
            Err(JobError::Transient(error)) => {
                attempt += 1;
                if attempt > max_retries {
                    tracing::error!(
                        error = %error,
                        system = %request.system,
                        attempts = attempt,
                        "job exhausted retries, dead-lettering"
                    );
                    return JobOutcome::DeadLettered;
                }

                tracing::warn!(
                    error = %error,
                    system = %request.system,
                    attempt,
                    max_retries,
                    "transient failure, retrying after backoff"
                );
                tokio::time::sleep(retry_delay).await;
            }
        }
    }
}

enum JobError {
    NonRetryable(AppError),
    Transient(AppError),
}

async fn run_job(dispatch_engine: &DispatchEngine, request: AdmissionRequest) -> Result<(), JobError> {
    let notification = dispatch_engine
        .save_notification(request)
        .await
        .map_err(classify)?;

    dispatch_engine
        .send_notification(notification)
        .await
        .map_err(JobError::Transient)
}

/// `save_notification` fails either because the request is malformed or its
/// references don't resolve (admission fault, spec.md §7 `BadRequest` /
/// `UnknownReference` — never retried) or because a dependency call itself
/// failed (transient infra fault — retried like any other uncaught error).
fn classify(error: AppError) -> JobError {
    match error {
        AppError::BadRequest { .. }
        | AppError::NotFound { .. }
        | AppError::Validation { .. }
        | AppError::ValidationErrors { .. }
        | AppError::Duplicate { .. } => JobError::NonRetryable(error),
        _ => JobError::Transient(error),
    }
}
