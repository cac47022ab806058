//! Metrics data types

use serde::Serialize;

/// Raw per-service counters
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct ServiceCounters {
    pub request_count: u64,
    pub success_count: u64,
    pub error_count: u64,
    /// Running mean latency in milliseconds
    pub average_response_time: f64,
}

impl ServiceCounters {
    /// Count one call and fold its latency into the running mean
    pub fn record(&mut self, latency_ms: f64, success: bool) {
        let latency = if latency_ms.is_finite() {
            latency_ms.max(0.0)
        } else {
            0.0
        };

        self.request_count += 1;
        if success {
            self.success_count += 1;
        } else {
            self.error_count += 1;
        }
        self.average_response_time +=
            (latency - self.average_response_time) / self.request_count as f64;
    }

    pub fn snapshot(&self) -> ServiceMetrics {
        ServiceMetrics::from_counts(
            self.request_count,
            self.success_count,
            self.error_count,
            self.average_response_time,
        )
    }
}

/// Point-in-time view of one dependency's call statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetrics {
    pub request_count: u64,
    pub success_count: u64,
    pub error_count: u64,
    /// Percentage of calls that failed
    pub error_rate: f64,
    /// Mean latency in milliseconds
    pub average_response_time: f64,
    /// Percentage of calls that succeeded, 100 when nothing was called
    pub uptime_percentage: f64,
}

impl ServiceMetrics {
    pub(super) fn from_counts(
        request_count: u64,
        success_count: u64,
        error_count: u64,
        average_response_time: f64,
    ) -> Self {
        let (error_rate, uptime_percentage) = if request_count == 0 {
            (0.0, 100.0)
        } else {
            let total = request_count as f64;
            (
                error_count as f64 / total * 100.0,
                success_count as f64 / total * 100.0,
            )
        };

        Self {
            request_count,
            success_count,
            error_count,
            error_rate,
            average_response_time,
            uptime_percentage,
        }
    }

    /// Metrics of a dependency that has not been called
    pub fn empty() -> Self {
        Self::from_counts(0, 0, 0, 0.0)
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::empty()
    }
}

/// Last observed rate-limit quota
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests left in the current window
    pub remaining: u64,
    /// When the window resets
    pub reset_at: chrono::DateTime<chrono::Utc>,
}

/// Rate-limit view served by the metrics endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitSnapshot {
    pub remaining: Option<u64>,
    pub reset: Option<chrono::DateTime<chrono::Utc>>,
    pub is_limited: bool,
}
