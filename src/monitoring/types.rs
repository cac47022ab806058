//! Type definitions shared across the monitoring subsystems

use crate::monitoring::health::HealthState;
use crate::monitoring::metrics::{RateLimitSnapshot, ServiceMetrics};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Alert severity levels, ordered from least to most severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertSeverity {
    /// All severities in ascending order
    pub const ALL: [AlertSeverity; 4] = [
        AlertSeverity::Low,
        AlertSeverity::Medium,
        AlertSeverity::High,
        AlertSeverity::Critical,
    ];

    /// Lowercase name used in JSON bodies and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Medium => "medium",
            AlertSeverity::High => "high",
            AlertSeverity::Critical => "critical",
        }
    }

    /// Severity for a failing check.
    ///
    /// Unhealthy services page as `high`, escalating to `critical` once the
    /// failure streak reaches twice the unhealthy threshold. Degraded services
    /// start at `low` and become `medium` from the second consecutive failure.
    pub fn for_failure(status: HealthState, consecutive_failures: u32, threshold: u32) -> Self {
        match status {
            HealthState::Unhealthy if consecutive_failures >= threshold.saturating_mul(2) => {
                AlertSeverity::Critical
            }
            HealthState::Unhealthy => AlertSeverity::High,
            _ if consecutive_failures >= 2 => AlertSeverity::Medium,
            _ => AlertSeverity::Low,
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Alert raised for a service that stopped being healthy
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Alert ID
    pub id: String,
    /// Alert severity
    pub severity: AlertSeverity,
    /// Human readable description
    pub message: String,
    /// Service the alert is about
    pub service: String,
    /// Status that triggered the alert
    pub condition: HealthState,
    /// Creation time
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Whether the alert is resolved
    pub resolved: bool,
    /// When the alert was resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Alert {
    /// Whether the alert is still active
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.resolved
    }
}

/// Call statistics served by the metrics endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    /// Totals across every monitored service
    pub api: ServiceMetrics,
    /// Per-service statistics, sorted by name
    pub services: BTreeMap<String, ServiceMetrics>,
    /// Last observed rate-limit quota
    pub rate_limit: RateLimitSnapshot,
}
