//! Per-dependency call counters

use super::types::{ServiceCounters, ServiceMetrics};
use dashmap::DashMap;
use std::collections::BTreeMap;
use tracing::info;

/// Records the outcome of every outbound dependency call
///
/// Updates only touch the shard holding the service entry, so concurrent
/// callers for different services never contend.
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    services: DashMap<String, ServiceCounters>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful call
    pub fn record_success(&self, service: &str, latency_ms: f64) {
        self.record(service, latency_ms, true);
    }

    /// Record a failed call
    pub fn record_error(&self, service: &str, latency_ms: f64) {
        self.record(service, latency_ms, false);
    }

    fn record(&self, service: &str, latency_ms: f64, success: bool) {
        // Avoid allocating the key on the hot path once the entry exists
        if let Some(mut counters) = self.services.get_mut(service) {
            counters.record(latency_ms, success);
            return;
        }
        self.services
            .entry(service.to_string())
            .or_default()
            .record(latency_ms, success);
    }

    /// Snapshot of one service
    pub fn get_metrics(&self, service: &str) -> Option<ServiceMetrics> {
        self.services.get(service).map(|c| c.snapshot())
    }

    /// Snapshot of every service, sorted by name
    pub fn all_metrics(&self) -> BTreeMap<String, ServiceMetrics> {
        self.services
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().snapshot()))
            .collect()
    }

    /// Combined totals across services, mean latency weighted by request count
    pub fn aggregate(&self) -> ServiceMetrics {
        let (mut requests, mut successes, mut errors, mut weighted) = (0u64, 0u64, 0u64, 0.0f64);
        for entry in self.services.iter() {
            let c = entry.value();
            requests += c.request_count;
            successes += c.success_count;
            errors += c.error_count;
            weighted += c.average_response_time * c.request_count as f64;
        }

        let average = if requests == 0 {
            0.0
        } else {
            weighted / requests as f64
        };
        ServiceMetrics::from_counts(requests, successes, errors, average)
    }

    /// Zero the counters of one service, returning what they were
    pub fn reset_metrics(&self, service: &str) -> Option<ServiceMetrics> {
        let mut counters = self.services.get_mut(service)?;
        let previous = counters.snapshot();
        *counters = ServiceCounters::default();
        drop(counters);

        info!(
            service,
            requests = previous.request_count,
            "Metrics reset"
        );
        Some(previous)
    }

    /// Zero the counters of every service, returning what they were
    pub fn reset_all(&self) -> BTreeMap<String, ServiceMetrics> {
        let mut previous = BTreeMap::new();
        for mut entry in self.services.iter_mut() {
            previous.insert(entry.key().clone(), entry.value().snapshot());
            *entry.value_mut() = ServiceCounters::default();
        }

        info!("Metrics reset for {} service(s)", previous.len());
        previous
    }

    /// Make a service visible with zeroed counters before its first call
    pub fn register(&self, service: &str) {
        if !self.services.contains_key(service) {
            self.services.entry(service.to_string()).or_default();
        }
    }
}
