//! Configuration management for the monitor
//!
//! Configuration comes from an optional YAML file, then environment variables
//! (a `.env` file is honoured), and is validated before anything starts. Every
//! setting has a default except the list of services to probe.

pub mod models;

pub use models::*;

use crate::utils::error::{MonitorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Main configuration struct for the monitor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Probe schedule and health policy
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// Services to probe
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
    /// Alert notification settings
    #[serde(default)]
    pub alerting: AlertingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MonitorError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text without validating it
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| MonitorError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load the effective configuration: file (if any), then environment, then validate
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            debug!("Loaded environment from {:?}", env_file);
        }

        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };
        config.apply_env()?;
        config.validate()?;

        info!(
            "Configuration loaded: {} service(s), probe interval {}s",
            config.services.len(),
            config.monitor.interval_secs
        );
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = var("CHAINWATCH_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("CHAINWATCH_PORT") {
            self.server.port = parse_var("CHAINWATCH_PORT", &port)?;
        }

        if let Some(v) = var("MONITOR_INTERVAL_SECS") {
            self.monitor.interval_secs = parse_var("MONITOR_INTERVAL_SECS", &v)?;
        }
        if let Some(v) = var("MONITOR_PROBE_TIMEOUT_SECS") {
            self.monitor.probe_timeout_secs = parse_var("MONITOR_PROBE_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = var("MONITOR_FAILURE_THRESHOLD") {
            self.monitor.failure_threshold = parse_var("MONITOR_FAILURE_THRESHOLD", &v)?;
        }
        if let Some(v) = var("MONITOR_HISTORY_CAPACITY") {
            self.monitor.history_capacity = parse_var("MONITOR_HISTORY_CAPACITY", &v)?;
        }
        if let Some(v) = var("MONITOR_SLOW_RESPONSE_MS") {
            self.monitor.slow_response_ms = parse_var("MONITOR_SLOW_RESPONSE_MS", &v)?;
        }

        if let Some(url) = var("RPC_URL") {
            self.upsert_service(ServiceConfig::rpc("rpc", url));
        }
        if let Some(url) = var("EXPLORER_API_URL") {
            let mut explorer = ServiceConfig::http("explorer", url);
            if let Some(path) = var("EXPLORER_HEALTH_PATH") {
                explorer.health_path = path;
            }
            self.upsert_service(explorer);
        }

        if let Some(webhook) = var("ALERT_WEBHOOK_URL") {
            self.alerting.webhook_url = Some(webhook);
        }

        Ok(())
    }

    /// Replace the URL of a same-named service, or add the service
    fn upsert_service(&mut self, service: ServiceConfig) {
        match self.services.iter_mut().find(|s| s.name == service.name) {
            Some(existing) => {
                existing.url = service.url;
                if service.kind == ServiceKind::Http {
                    existing.health_path = service.health_path;
                }
            }
            None => self.services.push(service),
        }
    }

    /// Look up a service by name
    pub fn service(&self, name: &str) -> Option<&ServiceConfig> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| MonitorError::Config(format!("Server config error: {}", e)))?;

        self.monitor
            .validate()
            .map_err(|e| MonitorError::Config(format!("Monitor config error: {}", e)))?;

        self.alerting
            .validate()
            .map_err(|e| MonitorError::Config(format!("Alerting config error: {}", e)))?;

        if self.services.is_empty() {
            return Err(MonitorError::Config(
                "No services configured; set RPC_URL and/or EXPLORER_API_URL or list services in the config file"
                    .to_string(),
            ));
        }

        let mut names = std::collections::HashSet::new();
        for service in &self.services {
            service
                .validate()
                .map_err(|e| MonitorError::Config(format!("Service config error: {}", e)))?;
            if let Some(timeout) = service.timeout_secs {
                if timeout >= self.monitor.interval_secs {
                    return Err(MonitorError::Config(format!(
                        "Service '{}' timeout ({}s) must be shorter than the probe interval ({}s)",
                        service.name, timeout, self.monitor.interval_secs
                    )));
                }
            }
            if !names.insert(service.name.as_str()) {
                return Err(MonitorError::Config(format!(
                    "Duplicate service name: {}",
                    service.name
                )));
            }
        }

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| MonitorError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| MonitorError::Config(format!("Invalid value for {}: {} ({})", key, value, e)))
}
