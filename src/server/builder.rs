//! Server builder and run_server function

use crate::config::Config;
use crate::monitoring::MonitoringSystem;
use crate::server::server::HttpServer;
use crate::utils::error::{MonitorError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Debug, Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    monitoring: Option<MonitoringSystem>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Serve an already constructed monitor instead of building one
    pub fn with_monitoring(mut self, monitoring: MonitoringSystem) -> Self {
        self.monitoring = Some(monitoring);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| MonitorError::config("Configuration is required"))?;

        match self.monitoring {
            Some(monitoring) => Ok(HttpServer::with_monitoring(&config, monitoring)),
            None => HttpServer::new(&config),
        }
    }
}

/// Build the server for `config` and run it to completion
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting chainwatch v{}", env!("CARGO_PKG_VERSION"));

    let server = ServerBuilder::new().with_config(config).build()?;
    let address = server.config().address();

    info!("Server starting at: http://{}", address);
    info!("API Endpoints:");
    info!("   GET  /health[?refresh=true] - Overall health");
    info!("   GET  /health/detailed - Health with metrics and alerts");
    info!("   GET  /health/history - Stored check results");
    info!("   GET  /metrics - Dependency call metrics");
    info!("   POST /metrics/reset - Reset call metrics");
    info!("   GET  /alerts - Active and recent alerts");
    info!("   POST /alerts/{{id}}/resolve - Resolve an alert");
    info!("   GET  /version - Build information");

    server.start().await
}
