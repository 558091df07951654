//! Server module for managing the backend HTTP server lifecycle.

use crate::api::routes::create_router;
use crate::config::{Environment, settings::Settings};
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::state::AppState;
use tokio::net::TcpListener;
use tokio::signal;

/// HTTP server manager for the backend.
pub struct Server {
    settings: Settings,
}

impl Server {
    /// Create a new server with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until shutdown signal
    ///
    /// # Errors
    /// - Database connection pool initialization errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %Environment::from_env().as_str(),
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            request_timeout = %self.settings.server.request_timeout,
            "Server configuration loaded"
        );

        tracing::info!(
            max_connections = %self.settings.database.max_connections,
            min_connections = %self.settings.database.min_connections,
            connection_timeout = %self.settings.database.connection_timeout,
            "Database configuration loaded"
        );

        self.settings.validate_for_server().map_err(|e| {
            tracing::error!(error = %e, "Configuration validation failed");
            anyhow::anyhow!("Configuration validation failed: {}", e)
        })?;

        if self.settings.database.auto_migrate {
            tracing::info!("Running pending database migrations...");
            run_pending_migrations(&self.settings.database.url).await?;
            tracing::info!("Database migrations applied");
        }

        tracing::info!("Initializing database connection pool...");
        let pool = establish_async_connection_pool(&self.settings.database).await?;
        tracing::info!("Database connection pool initialized");

        let state = AppState::new(pool);
        let router = create_router(state);

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
pub async fn shutdown_signal() {
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
