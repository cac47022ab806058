//! One-shot health report for the command line

use super::alerts::AlertSummary;
use super::health::{HealthState, SystemHealth};
use super::system::MonitoringSystem;
use super::types::MetricsReport;
use crate::utils::error::Result;
use crate::utils::format_duration;
use serde::Serialize;

/// Snapshot of health, call metrics and alerts after one probe cycle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub health: SystemHealth,
    pub metrics: MetricsReport,
    pub alerts: AlertSummary,
    /// Mean probe latency, human readable
    pub average_response_time: String,
}

impl HealthReport {
    /// Run one cycle and collect the report
    pub async fn collect(monitoring: &MonitoringSystem) -> Self {
        let health = monitoring.perform_health_check().await;
        let metrics = monitoring.metrics();
        let average_response_time = format_duration(metrics.api.average_response_time.round() as u64);

        Self {
            health,
            metrics,
            alerts: monitoring.alert_summary(),
            average_response_time,
        }
    }

    /// Process exit code: 0 healthy, 1 degraded, 2 unhealthy
    pub fn exit_code(&self) -> u8 {
        match self.health.overall {
            HealthState::Healthy => 0,
            HealthState::Degraded => 1,
            HealthState::Unhealthy => 2,
        }
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
