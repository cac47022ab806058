//! Bounded log of health check results

use super::bounded::BoundedPush;
use super::types::{HealthTrend, HistoryStatistics};
use crate::monitoring::health::{HealthCheckResult, HealthState};
use parking_lot::RwLock;
use std::collections::VecDeque;
use tracing::trace;

/// Healthy-ratio change, in percentage points, that counts as a trend
const TREND_THRESHOLD: f64 = 10.0;

/// Append-only, capacity-bounded history of health check results.
///
/// Oldest entries are evicted first. All queries work on the retained window.
#[derive(Debug)]
pub struct HistoryStore {
    entries: RwLock<VecDeque<HealthCheckResult>>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity.min(4096))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Append one result, evicting the oldest when full
    pub fn append(&self, result: HealthCheckResult) {
        let evicted = self.entries.write().push_bounded(result, self.capacity);
        if let Some(old) = evicted {
            trace!(service = %old.service, "History full, evicted oldest result");
        }
    }

    /// Append a cycle's results under a single lock
    pub fn extend<I>(&self, results: I)
    where
        I: IntoIterator<Item = HealthCheckResult>,
    {
        let mut entries = self.entries.write();
        for result in results {
            entries.push_bounded(result, self.capacity);
        }
    }

    /// Oldest-first results, optionally for one service, keeping the most recent `limit`
    pub fn get_history(&self, service: Option<&str>, limit: Option<usize>) -> Vec<HealthCheckResult> {
        let mut matching = self.matching(service);
        if let Some(limit) = limit {
            let excess = matching.len().saturating_sub(limit);
            matching.drain(..excess);
        }
        matching
    }

    /// Percentage of retained results that were healthy, 100 when there are none
    pub fn get_uptime_percentage(&self, service: Option<&str>) -> f64 {
        let entries = self.entries.read();
        let (total, healthy) = entries
            .iter()
            .filter(|r| matches_service(r, service))
            .fold((0usize, 0usize), |(total, healthy), r| {
                (total + 1, healthy + usize::from(r.status.is_healthy()))
            });

        if total == 0 {
            100.0
        } else {
            healthy as f64 / total as f64 * 100.0
        }
    }

    /// Compare the healthy ratio of the most recent third with the earliest third
    pub fn get_health_trend(&self, service: Option<&str>) -> HealthTrend {
        let matching = self.matching(service);
        if matching.len() < 3 {
            return HealthTrend::Stable;
        }

        let third = matching.len() / 3;
        let earliest = healthy_ratio(&matching[..third]);
        let recent = healthy_ratio(&matching[matching.len() - third..]);

        let delta = (recent - earliest) * 100.0;
        if delta > TREND_THRESHOLD {
            HealthTrend::Improving
        } else if delta < -TREND_THRESHOLD {
            HealthTrend::Degrading
        } else {
            HealthTrend::Stable
        }
    }

    /// Statistics over a result slice, typically one returned by `get_history`
    pub fn statistics(&self, results: &[HealthCheckResult]) -> HistoryStatistics {
        HistoryStatistics::from_results(results)
    }

    /// Latest retained status of a service
    pub fn last_status(&self, service: &str) -> Option<HealthState> {
        self.entries
            .read()
            .iter()
            .rev()
            .find(|r| r.service == service)
            .map(|r| r.status)
    }

    fn matching(&self, service: Option<&str>) -> Vec<HealthCheckResult> {
        self.entries
            .read()
            .iter()
            .filter(|r| matches_service(r, service))
            .cloned()
            .collect()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(crate::config::default_history_capacity())
    }
}

fn matches_service(result: &HealthCheckResult, service: Option<&str>) -> bool {
    service.is_none_or(|name| result.service == name)
}

fn healthy_ratio(results: &[HealthCheckResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().filter(|r| r.status.is_healthy()).count() as f64 / results.len() as f64
}
