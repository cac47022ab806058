//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::monitoring::MonitoringSystem;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Cloned into every actix worker; all clones share the same monitor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Effective configuration (shared read-only)
    pub config: Arc<Config>,
    /// Monitoring system the endpoints query
    pub monitoring: MonitoringSystem,
}

impl AppState {
    pub fn new(config: Config, monitoring: MonitoringSystem) -> Self {
        Self {
            config: Arc::new(config),
            monitoring,
        }
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
