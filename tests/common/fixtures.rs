//! Configuration fixtures

use chainwatch::config::{Config, ServiceConfig};

/// Factory for test configurations
pub struct ConfigFactory;

impl ConfigFactory {
    /// `rpc` and `explorer` services with default policy and quiet alerting
    pub fn create() -> Config {
        Self::with_services(vec![
            ServiceConfig::rpc("rpc", "https://rpc.example.org"),
            ServiceConfig::http("explorer", "https://explorer.example.org"),
        ])
    }

    pub fn with_services(services: Vec<ServiceConfig>) -> Config {
        let mut config = Config::default();
        config.services = services;
        config.alerting.log_alerts = false;
        config.monitor.probe_timeout_secs = 2;
        config
    }
}
