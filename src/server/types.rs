//! Response bodies for the HTTP endpoints

use crate::monitoring::{
    Alert, AlertSummary, HealthCheckResult, HealthState, HealthTrend, HistoryStatistics,
    MetricsReport, ServiceMetrics, SystemHealth,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// `GET /health`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: HealthState,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Process uptime in milliseconds
    pub uptime: u64,
    pub health_score: u8,
    pub services: Vec<ServiceStatus>,
}

/// One service in `GET /health`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub name: String,
    pub status: HealthState,
    pub response_time: u64,
    pub last_check: chrono::DateTime<chrono::Utc>,
}

impl From<&SystemHealth> for HealthResponse {
    fn from(health: &SystemHealth) -> Self {
        Self {
            status: health.overall,
            timestamp: health.last_check,
            uptime: health.uptime_ms,
            health_score: health.health_score,
            services: health
                .services
                .iter()
                .map(|r| ServiceStatus {
                    name: r.service.clone(),
                    status: r.status,
                    response_time: r.response_time_ms,
                    last_check: r.timestamp,
                })
                .collect(),
        }
    }
}

/// Query string of `GET /health`
#[derive(Debug, Default, Deserialize)]
pub struct HealthQuery {
    /// Run a fresh cycle before answering
    #[serde(default)]
    pub refresh: bool,
}

/// `GET /health/detailed`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthResponse {
    #[serde(flatten)]
    pub health: SystemHealth,
    pub metrics: DetailedMetrics,
    pub alerts: AlertCounts,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedMetrics {
    pub api: ServiceMetrics,
    pub services: BTreeMap<String, ServiceMetrics>,
    pub uptime: UptimeView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UptimeView {
    /// Healthy share of retained history
    pub percentage: f64,
    pub trend: HealthTrend,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertCounts {
    pub active: usize,
    pub total: usize,
    pub by_service: BTreeMap<String, usize>,
}

impl From<&AlertSummary> for AlertCounts {
    fn from(summary: &AlertSummary) -> Self {
        Self {
            active: summary.active,
            total: summary.total,
            by_service: summary.by_service.clone(),
        }
    }
}

/// Query string of `GET /health/history`
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub service: Option<String>,
    pub limit: Option<usize>,
}

/// `GET /health/history`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
    pub statistics: HistoryStatistics,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub service: String,
    pub status: HealthState,
    pub response_time: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub error: Option<String>,
}

impl From<HealthCheckResult> for HistoryEntry {
    fn from(result: HealthCheckResult) -> Self {
        Self {
            service: result.service,
            status: result.status,
            response_time: result.response_time_ms,
            timestamp: result.timestamp,
            error: result.error,
        }
    }
}

/// `GET /metrics` is the monitor's [`MetricsReport`] as is
pub type MetricsResponse = MetricsReport;

/// `POST /metrics/reset`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub success: bool,
    pub previous_metrics: BTreeMap<String, ServiceMetrics>,
}

/// `GET /alerts`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsResponse {
    pub active: Vec<Alert>,
    pub resolved: Vec<Alert>,
    pub summary: AlertSummary,
}

/// `POST /alerts/{id}/resolve`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub success: bool,
    pub message: String,
    pub alert_id: String,
}

/// `GET /version`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub name: Cow<'static, str>,
    pub version: Cow<'static, str>,
    pub build_time: Cow<'static, str>,
    pub git_hash: Cow<'static, str>,
    pub rust_version: Cow<'static, str>,
}
