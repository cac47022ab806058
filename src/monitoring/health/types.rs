//! Health checking types and data structures

use serde::{Deserialize, Serialize};

/// Health of a single service or of the whole system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// Last probe succeeded
    Healthy,
    /// Failing, but below the unhealthy threshold
    Degraded,
    /// Failed at least the threshold number of consecutive probes
    Unhealthy,
}

impl HealthState {
    /// Lowercase name used in JSON bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthState::Healthy => "healthy",
            HealthState::Degraded => "degraded",
            HealthState::Unhealthy => "unhealthy",
        }
    }

    #[inline]
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthState::Healthy)
    }

    /// HTTP status code reported by the health endpoints
    pub fn http_status(&self) -> u16 {
        match self {
            HealthState::Healthy => 200,
            HealthState::Degraded => 206,
            HealthState::Unhealthy => 503,
        }
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one probe of one service in one cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResult {
    /// Service name
    pub service: String,
    /// Classified status after hysteresis
    pub status: HealthState,
    /// Probe response time in milliseconds
    #[serde(rename = "responseTime")]
    pub response_time_ms: u64,
    /// When the probe completed
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Probe error, if the probe failed
    pub error: Option<String>,
    /// Failures since the last success
    pub consecutive_failures: u32,
}

/// Composite health snapshot produced by one cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    /// Overall status
    pub overall: HealthState,
    /// When the snapshot was computed
    pub last_check: chrono::DateTime<chrono::Utc>,
    /// Process uptime in milliseconds
    #[serde(rename = "uptime")]
    pub uptime_ms: u64,
    /// 0-100 composite score
    pub health_score: u8,
    /// Latest result per service, in registration order
    pub services: Vec<HealthCheckResult>,
}

impl SystemHealth {
    /// Snapshot served before the first cycle completes
    pub fn initial() -> Self {
        Self {
            overall: HealthState::Healthy,
            last_check: chrono::Utc::now(),
            uptime_ms: 0,
            health_score: 100,
            services: Vec::new(),
        }
    }

    /// Latest result for a service
    pub fn service(&self, name: &str) -> Option<&HealthCheckResult> {
        self.services.iter().find(|s| s.service == name)
    }

    /// Whether any cycle has produced this snapshot
    pub fn has_checks(&self) -> bool {
        !self.services.is_empty()
    }
}

/// Policy knobs consumed by the aggregator
#[derive(Debug, Clone)]
pub struct AggregatorSettings {
    /// Timeout used for probes without their own override
    pub probe_timeout: std::time::Duration,
    /// Consecutive failures before a service is unhealthy
    pub failure_threshold: u32,
    /// Response time above which the overall status degrades
    pub slow_response_ms: u64,
    /// Health score weights
    pub weights: super::scoring::ScoreWeights,
}

impl From<&crate::config::MonitorConfig> for AggregatorSettings {
    fn from(config: &crate::config::MonitorConfig) -> Self {
        Self {
            probe_timeout: config.probe_timeout(),
            failure_threshold: config.failure_threshold,
            slow_response_ms: config.slow_response_ms,
            weights: super::scoring::ScoreWeights {
                degraded_penalty: config.degraded_penalty,
                unhealthy_penalty: config.unhealthy_penalty,
            },
        }
    }
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self::from(&crate::config::MonitorConfig::default())
    }
}
