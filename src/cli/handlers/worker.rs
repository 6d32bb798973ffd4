//! Worker command handler
//!
//! Handles the `worker` command including dry-run validation. Actual
//! consumption is started by `main.rs` once this handler signals that
//! configuration is valid, mirroring `ServeCommandHandler`.

use crate::config::settings::Settings;
use crate::error::AppResult;

/// Handler for the `worker` command
pub struct WorkerCommandHandler {
    config: Settings,
}

impl WorkerCommandHandler {
    /// Create a new worker command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the worker command with optional dry-run support
    ///
    /// # Errors
    /// - Configuration validation errors
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            self.validate_only().await
        } else {
            // Actual consumption is handled in main.rs
            Ok(())
        }
    }

    /// Validate configuration without starting the consumer
    pub async fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Database URL is configured");
        println!(
            "✓ Dispatch queue: {} on {}:{}",
            self.config.amqp.dispatch_queue, self.config.amqp.host, self.config.amqp.port
        );
        println!(
            "✓ Worker concurrency: {}, max retries: {}, retry delay: {}s",
            self.config.amqp.worker_concurrency,
            self.config.amqp.worker_max_retries,
            self.config.amqp.worker_retry_delay_seconds
        );
        println!("Dry run completed successfully - worker is ready to start");
        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}
