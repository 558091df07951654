//! Gateway server lifecycle.

use tokio::net::TcpListener;

use crate::config::settings::Settings;
use crate::gateway::{BackendClient, GatewayState, create_gateway_router};
use crate::server::shutdown_signal;

/// HTTP server manager for the gateway tier.
pub struct GatewayServer {
    settings: Settings,
}

impl GatewayServer {
    /// Create a new gateway server with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the gateway and run until shutdown signal
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            backend_url = %self.settings.gateway.backend_url,
            "Gateway starting"
        );

        self.settings.validate_for_gateway().map_err(|e| {
            tracing::error!(error = %e, "Configuration validation failed");
            anyhow::anyhow!("Configuration validation failed: {}", e)
        })?;

        let client = BackendClient::new(&self.settings.gateway)
            .map_err(|e| anyhow::anyhow!("Failed to build backend client: {}", e))?;
        let router = create_gateway_router(GatewayState { client });

        let address = self.settings.gateway.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Gateway listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Gateway shutdown complete");

        Ok(())
    }
}
