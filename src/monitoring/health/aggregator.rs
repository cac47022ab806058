//! Probe cycles, hysteresis and the system health snapshot

use super::scoring::{classify, health_score, overall_status};
use super::types::{AggregatorSettings, HealthCheckResult, HealthState, SystemHealth};
use crate::monitoring::alerts::AlertManager;
use crate::monitoring::history::HistoryStore;
use crate::monitoring::metrics::MetricsRecorder;
use crate::monitoring::probe::{ProbeError, ProbeOutcome, ServiceProbe};
use arc_swap::ArcSwap;
use futures::future::join_all;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Extra time a probe gets past its own timeout before the cycle gives up on it
pub const PROBE_GRACE: Duration = Duration::from_secs(1);

/// Hysteresis state of one service
#[derive(Debug, Clone, Copy)]
struct ServiceState {
    consecutive_failures: u32,
    status: HealthState,
}

/// Runs probe cycles and owns the latest [`SystemHealth`].
///
/// Cycles are mutually exclusive. Readers get the last committed snapshot
/// without waiting for a cycle in flight.
#[derive(Debug)]
pub struct HealthAggregator {
    probes: Vec<Arc<dyn ServiceProbe>>,
    settings: AggregatorSettings,
    /// Only written inside a cycle
    states: Mutex<HashMap<String, ServiceState>>,
    latest: ArcSwap<SystemHealth>,
    cycle_lock: tokio::sync::Mutex<()>,
    history: Arc<HistoryStore>,
    alerts: AlertManager,
    /// Charged for probes abandoned past their deadline
    metrics: Arc<MetricsRecorder>,
    started_at: Instant,
    cycles_run: AtomicU64,
    cycles_skipped: AtomicU64,
}

impl HealthAggregator {
    pub fn new(
        probes: Vec<Arc<dyn ServiceProbe>>,
        settings: AggregatorSettings,
        history: Arc<HistoryStore>,
        alerts: AlertManager,
        metrics: Arc<MetricsRecorder>,
    ) -> Self {
        Self {
            probes,
            settings,
            states: Mutex::new(HashMap::new()),
            latest: ArcSwap::from_pointee(SystemHealth::initial()),
            cycle_lock: tokio::sync::Mutex::new(()),
            history,
            alerts,
            metrics,
            started_at: Instant::now(),
            cycles_run: AtomicU64::new(0),
            cycles_skipped: AtomicU64::new(0),
        }
    }

    /// Run a cycle unless one is already in flight
    pub async fn run_cycle(&self) -> Option<SystemHealth> {
        match self.cycle_lock.try_lock() {
            Ok(_guard) => Some(self.execute_cycle().await),
            Err(_) => {
                self.cycles_skipped.fetch_add(1, Ordering::Relaxed);
                warn!("Health check cycle already in progress, skipping cycle");
                None
            }
        }
    }

    /// Run a cycle, or wait for the one in flight and return its snapshot
    pub async fn run_or_await_cycle(&self) -> SystemHealth {
        if let Ok(_guard) = self.cycle_lock.try_lock() {
            return self.execute_cycle().await;
        }

        debug!("Waiting for in-flight health check cycle");
        let _guard = self.cycle_lock.lock().await;
        (*self.latest()).clone()
    }

    async fn execute_cycle(&self) -> SystemHealth {
        let started = Instant::now();
        debug!("Running health check cycle over {} service(s)", self.probes.len());

        let outcomes = join_all(self.probes.iter().map(|probe| self.probe_bounded(probe))).await;

        let results: Vec<HealthCheckResult> = self
            .probes
            .iter()
            .zip(outcomes)
            .map(|(probe, outcome)| self.record_outcome(probe.name(), outcome))
            .collect();

        self.history.extend(results.iter().cloned());
        for result in &results {
            self.alerts.evaluate(result);
        }

        let health = SystemHealth {
            overall: overall_status(&results, self.settings.slow_response_ms),
            last_check: chrono::Utc::now(),
            uptime_ms: self.started_at.elapsed().as_millis() as u64,
            health_score: health_score(&results, self.settings.weights),
            services: results,
        };
        self.latest.store(Arc::new(health.clone()));
        self.cycles_run.fetch_add(1, Ordering::Relaxed);

        debug!(
            overall = %health.overall,
            score = health.health_score,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Health check cycle complete"
        );
        health
    }

    /// Probe with the aggregator's own deadline on top of the probe's timeout
    async fn probe_bounded(&self, probe: &Arc<dyn ServiceProbe>) -> ProbeOutcome {
        let timeout = probe.timeout().unwrap_or(self.settings.probe_timeout);
        let started = Instant::now();

        match tokio::time::timeout(timeout + PROBE_GRACE, probe.probe(timeout)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                let elapsed_ms = started.elapsed().as_millis() as u64;
                warn!(
                    service = probe.name(),
                    elapsed_ms, "Probe overran its timeout, abandoning it"
                );
                // The dropped call never reached its own bookkeeping
                self.metrics.record_error(probe.name(), elapsed_ms as f64);
                ProbeOutcome::failure(elapsed_ms, ProbeError::Timeout(timeout.as_millis() as u64))
            }
        }
    }

    /// Apply one probe outcome to a service's failure streak.
    ///
    /// A success resets the streak. A failure extends it, degrading the
    /// service until the streak reaches the failure threshold.
    pub fn record_outcome(&self, service: &str, outcome: ProbeOutcome) -> HealthCheckResult {
        let threshold = self.settings.failure_threshold;

        let (previous, current) = {
            let mut states = self.states.lock();
            let state = states.entry(service.to_string()).or_insert(ServiceState {
                consecutive_failures: 0,
                status: HealthState::Healthy,
            });
            let previous = state.status;

            state.consecutive_failures = if outcome.is_success() {
                0
            } else {
                state.consecutive_failures.saturating_add(1)
            };
            state.status = classify(state.consecutive_failures, threshold);
            (previous, *state)
        };

        if let Some(error) = &outcome.error {
            warn!(
                service,
                consecutive_failures = current.consecutive_failures,
                "Probe failed: {}",
                error
            );
        }
        if previous != current.status {
            info!(
                service,
                from = %previous,
                to = %current.status,
                "Service health changed"
            );
        }

        HealthCheckResult {
            service: service.to_string(),
            status: current.status,
            response_time_ms: outcome.response_time_ms,
            timestamp: chrono::Utc::now(),
            error: outcome.error.map(|e| e.to_string()),
            consecutive_failures: current.consecutive_failures,
        }
    }

    /// Last committed snapshot
    pub fn latest(&self) -> Arc<SystemHealth> {
        self.latest.load_full()
    }

    /// Service names in registration order
    pub fn service_names(&self) -> Vec<String> {
        self.probes.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn has_service(&self, name: &str) -> bool {
        self.probes.iter().any(|p| p.name() == name)
    }

    pub fn settings(&self) -> &AggregatorSettings {
        &self.settings
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    pub fn alerts(&self) -> &AlertManager {
        &self.alerts
    }

    /// Whether a cycle holds the cycle lock right now
    pub fn is_cycle_running(&self) -> bool {
        self.cycle_lock.try_lock().is_err()
    }

    pub fn cycles_run(&self) -> u64 {
        self.cycles_run.load(Ordering::Relaxed)
    }

    pub fn cycles_skipped(&self) -> u64 {
        self.cycles_skipped.load(Ordering::Relaxed)
    }

    pub(super) fn note_skipped(&self) {
        self.cycles_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Process uptime
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
