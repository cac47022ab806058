//! Monitored service configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a service is probed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    /// JSON-RPC node, probed with a read-only RPC call
    Rpc,
    /// REST API, probed with a GET on its health path
    Http,
}

/// A dependency to monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name, unique across the configuration
    pub name: String,
    /// Probe kind
    pub kind: ServiceKind,
    /// Base URL of the service
    pub url: String,
    /// Health path appended to `url` for HTTP services
    #[serde(default = "default_health_path")]
    pub health_path: String,
    /// JSON-RPC method used by RPC probes
    #[serde(default = "default_rpc_method")]
    pub rpc_method: String,
    /// Per-service timeout override in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ServiceConfig {
    /// RPC service with default probe settings
    pub fn rpc(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ServiceKind::Rpc,
            url: url.into(),
            health_path: default_health_path(),
            rpc_method: default_rpc_method(),
            timeout_secs: None,
        }
    }

    /// HTTP service with default probe settings
    pub fn http(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ServiceKind::Http,
            url: url.into(),
            health_path: default_health_path(),
            rpc_method: default_rpc_method(),
            timeout_secs: None,
        }
    }

    /// Timeout override, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// URL the probe requests
    pub fn probe_url(&self) -> String {
        match self.kind {
            ServiceKind::Rpc => self.url.clone(),
            ServiceKind::Http => {
                let base = self.url.trim_end_matches('/');
                let path = self.health_path.trim_start_matches('/');
                if path.is_empty() {
                    base.to_string()
                } else {
                    format!("{}/{}", base, path)
                }
            }
        }
    }

    /// Validate service configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Service name cannot be empty".to_string());
        }

        let url = url::Url::parse(&self.url)
            .map_err(|e| format!("Service '{}' has invalid URL: {}", self.name, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "Service '{}' must use http:// or https://, got: {}",
                self.name,
                url.scheme()
            ));
        }

        if self.timeout_secs == Some(0) {
            return Err(format!("Service '{}' timeout cannot be 0", self.name));
        }

        if self.kind == ServiceKind::Rpc && self.rpc_method.trim().is_empty() {
            return Err(format!("Service '{}' RPC method cannot be empty", self.name));
        }

        Ok(())
    }
}
