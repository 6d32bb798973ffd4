//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;

use crate::amqp::{establish_connection, AmqpPublisher};
use crate::api::routes::create_router;
use crate::config::{settings::Settings, Environment};
use crate::db::establish_async_connection_pool;
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    /// Create a new server with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Log all configuration settings at startup
    fn log_startup_config(&self) {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %Environment::from_env().as_str(),
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            log_level = %self.settings.logger.level,
            "Configuration loaded"
        );
    }

    /// Initialize database connection pool
    async fn initialize_database(&self) -> anyhow::Result<crate::db::AsyncDbPool> {
        tracing::info!("Initializing database connection pool...");
        let pool = establish_async_connection_pool(&self.settings.database).await?;
        tracing::info!("Database connection pool initialized");
        Ok(pool)
    }

    /// Initialize the AMQP connection and the publisher shared by the
    /// admission handler, the Callback Emitter and the Task Worker.
    async fn initialize_amqp(&self) -> anyhow::Result<Arc<AmqpPublisher>> {
        tracing::info!(
            host = %self.settings.amqp.host,
            port = %self.settings.amqp.port,
            "Connecting to AMQP broker"
        );
        let connection = establish_connection(&self.settings.amqp).await?;
        let publisher = AmqpPublisher::new(&connection).await?;
        tracing::info!("AMQP connection established");
        Ok(Arc::new(publisher))
    }

    /// Bind TCP listener to configured address
    async fn bind_listener(&self) -> anyhow::Result<TcpListener> {
        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %format!("http://{}", address), "Server listening");
        Ok(listener)
    }

    /// Start the server and run until shutdown signal
    ///
    /// This method:
    /// 1. Logs startup information
    /// 2. Initializes the database connection pool
    /// 3. Initializes the AMQP connection
    /// 4. Creates application state
    /// 5. Binds to configured address
    /// 6. Starts the HTTP server with graceful shutdown
    ///
    /// # Errors
    /// - Database connection pool initialization errors
    /// - AMQP connection errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        self.log_startup_config();

        let pool = self.initialize_database().await?;
        let amqp_publisher = self.initialize_amqp().await?;

        let state = AppState::new(pool, amqp_publisher, self.settings.amqp.dispatch_queue.clone());
        tracing::info!("Application state created");

        let router = create_router(state);
        tracing::info!("Router configured");

        let listener = self.bind_listener().await?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
///
/// This function returns when either signal is received, allowing
/// the server to perform graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
