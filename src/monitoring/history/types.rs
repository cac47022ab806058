//! History query types

use crate::monitoring::health::{HealthCheckResult, HealthState};
use serde::Serialize;

/// Direction of recent health compared with the start of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTrend {
    Improving,
    Stable,
    Degrading,
}

impl HealthTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthTrend::Improving => "improving",
            HealthTrend::Stable => "stable",
            HealthTrend::Degrading => "degrading",
        }
    }
}

impl std::fmt::Display for HealthTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary statistics over a slice of history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStatistics {
    pub total_checks: usize,
    pub average_response_time: f64,
    pub healthy_percentage: f64,
    pub degraded_percentage: f64,
    pub unhealthy_percentage: f64,
}

impl HistoryStatistics {
    pub fn from_results(results: &[HealthCheckResult]) -> Self {
        let total = results.len();
        if total == 0 {
            return Self {
                total_checks: 0,
                average_response_time: 0.0,
                healthy_percentage: 0.0,
                degraded_percentage: 0.0,
                unhealthy_percentage: 0.0,
            };
        }

        let share = |state: HealthState| {
            results.iter().filter(|r| r.status == state).count() as f64 / total as f64 * 100.0
        };
        let response_sum: u64 = results.iter().map(|r| r.response_time_ms).sum();

        Self {
            total_checks: total,
            average_response_time: response_sum as f64 / total as f64,
            healthy_percentage: share(HealthState::Healthy),
            degraded_percentage: share(HealthState::Degraded),
            unhealthy_percentage: share(HealthState::Unhealthy),
        }
    }
}
