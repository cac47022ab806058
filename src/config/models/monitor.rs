//! Probe schedule and health policy configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Health monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between probe cycles
    #[serde(default = "default_probe_interval")]
    pub interval_secs: u64,
    /// Default per-probe timeout in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
    /// Consecutive failures before a service is unhealthy
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    /// Maximum retained health check results
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Response time in milliseconds above which the system is degraded
    #[serde(default = "default_slow_response_ms")]
    pub slow_response_ms: u64,
    /// Health score penalty per degraded service
    #[serde(default = "default_degraded_penalty")]
    pub degraded_penalty: u8,
    /// Health score penalty per unhealthy service
    #[serde(default = "default_unhealthy_penalty")]
    pub unhealthy_penalty: u8,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_probe_interval(),
            probe_timeout_secs: default_probe_timeout(),
            failure_threshold: default_failure_threshold(),
            history_capacity: default_history_capacity(),
            slow_response_ms: default_slow_response_ms(),
            degraded_penalty: default_degraded_penalty(),
            unhealthy_penalty: default_unhealthy_penalty(),
        }
    }
}

impl MonitorConfig {
    /// Probe cycle interval
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Default probe timeout
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Validate monitor configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.interval_secs == 0 {
            return Err("Probe interval cannot be 0".to_string());
        }

        if self.probe_timeout_secs == 0 {
            return Err("Probe timeout cannot be 0".to_string());
        }

        if self.probe_timeout_secs >= self.interval_secs {
            return Err(format!(
                "Probe timeout ({}s) must be shorter than the probe interval ({}s)",
                self.probe_timeout_secs, self.interval_secs
            ));
        }

        if self.failure_threshold == 0 {
            return Err("Failure threshold cannot be 0".to_string());
        }

        if self.history_capacity == 0 {
            return Err("History capacity cannot be 0".to_string());
        }

        if self.degraded_penalty == 0 || self.unhealthy_penalty == 0 {
            return Err("Health score penalties cannot be 0".to_string());
        }

        if self.unhealthy_penalty < self.degraded_penalty {
            return Err(format!(
                "Unhealthy penalty ({}) cannot be smaller than the degraded penalty ({})",
                self.unhealthy_penalty, self.degraded_penalty
            ));
        }

        Ok(())
    }
}
