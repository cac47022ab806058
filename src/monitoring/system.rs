//! Core MonitoringSystem implementation

use crate::config::Config;
use crate::utils::error::{MonitorError, Result};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::alerts::{AlertManager, AlertSummary};
use super::health::{AggregatorSettings, HealthAggregator, HealthCheckResult, SystemHealth};
use super::history::{HealthTrend, HistoryStatistics, HistoryStore};
use super::metrics::{MetricsRecorder, RateLimitSnapshot, RateLimitTracker, ServiceMetrics};
use super::probe::{InstrumentedClient, ServiceProbe, build_probe};
use super::types::{Alert, MetricsReport};

/// Handles to the running background loops
#[derive(Debug)]
pub(super) struct BackgroundTasks {
    pub shutdown: watch::Sender<bool>,
    pub handles: Vec<JoinHandle<()>>,
}

/// Owns every monitoring component and answers health queries.
///
/// Cheap to clone; clones share the same state. Queries never wait for a
/// probe cycle except [`perform_health_check`](Self::perform_health_check).
#[derive(Debug, Clone)]
pub struct MonitoringSystem {
    pub(super) metrics: Arc<MetricsRecorder>,
    pub(super) rate_limits: Arc<RateLimitTracker>,
    pub(super) client: InstrumentedClient,
    pub(super) health: Arc<HealthAggregator>,
    pub(super) history: Arc<HistoryStore>,
    pub(super) alerts: AlertManager,
    pub(super) interval: Duration,
    pub(super) dispatch_interval: Duration,
    pub(super) tasks: Arc<Mutex<Option<BackgroundTasks>>>,
}

impl MonitoringSystem {
    /// Build the monitor for the services in `config`
    pub fn new(config: &Config) -> Result<Self> {
        let metrics = Arc::new(MetricsRecorder::new());
        let rate_limits = Arc::new(RateLimitTracker::new());
        let client = InstrumentedClient::new(metrics.clone(), rate_limits.clone())?;

        let probes = config
            .services
            .iter()
            .map(|service| build_probe(service, client.clone()))
            .collect();

        Self::assemble(config, probes, metrics, rate_limits, client)
    }

    /// Build the monitor around caller-supplied probes
    pub fn with_probes(config: &Config, probes: Vec<Arc<dyn ServiceProbe>>) -> Result<Self> {
        let metrics = Arc::new(MetricsRecorder::new());
        let rate_limits = Arc::new(RateLimitTracker::new());
        let client = InstrumentedClient::new(metrics.clone(), rate_limits.clone())?;

        Self::assemble(config, probes, metrics, rate_limits, client)
    }

    fn assemble(
        config: &Config,
        probes: Vec<Arc<dyn ServiceProbe>>,
        metrics: Arc<MetricsRecorder>,
        rate_limits: Arc<RateLimitTracker>,
        client: InstrumentedClient,
    ) -> Result<Self> {
        info!("Initializing monitoring system");
        config.validate()?;

        let mut seen = std::collections::HashSet::new();
        for probe in &probes {
            if !seen.insert(probe.name().to_string()) {
                return Err(MonitorError::config(format!(
                    "Duplicate probe for service: {}",
                    probe.name()
                )));
            }
            metrics.register(probe.name());
        }

        let monitor = &config.monitor;
        let history = Arc::new(HistoryStore::new(monitor.history_capacity));
        let alerts = AlertManager::new(&config.alerting, monitor.failure_threshold);
        let health = Arc::new(HealthAggregator::new(
            probes,
            AggregatorSettings::from(monitor),
            history.clone(),
            alerts.clone(),
            metrics.clone(),
        ));

        info!(
            "Monitoring {} service(s): {}",
            seen.len(),
            health.service_names().join(", ")
        );

        Ok(Self {
            metrics,
            rate_limits,
            client,
            health,
            history,
            alerts,
            interval: monitor.interval(),
            dispatch_interval: Duration::from_secs(config.alerting.dispatch_interval_secs),
            tasks: Arc::new(Mutex::new(None)),
        })
    }

    /// Start the probe loop and the alert dispatcher
    pub fn start(&self) -> Result<()> {
        let mut tasks = self.tasks.lock();
        if tasks.is_some() {
            warn!("Monitoring system already started");
            return Ok(());
        }

        info!("Starting monitoring system");
        let (shutdown, rx) = watch::channel(false);
        let handles = self.spawn_background_tasks(rx);
        *tasks = Some(BackgroundTasks { shutdown, handles });

        info!("Monitoring system started successfully");
        Ok(())
    }

    /// Signal the background loops to stop and wait for them
    pub async fn stop(&self) -> Result<()> {
        let Some(tasks) = self.tasks.lock().take() else {
            return Ok(());
        };

        info!("Stopping monitoring system");
        let _ = tasks.shutdown.send(true);
        for handle in tasks.handles {
            if let Err(e) = handle.await {
                warn!("Background task ended abnormally: {}", e);
            }
        }

        info!("Monitoring system stopped");
        Ok(())
    }

    /// Whether background loops are running
    pub fn is_running(&self) -> bool {
        self.tasks.lock().is_some()
    }

    /// Run a cycle now, or wait for the one in flight, and return its snapshot
    pub async fn perform_health_check(&self) -> SystemHealth {
        self.health.run_or_await_cycle().await
    }

    /// Last committed snapshot
    pub fn current_health(&self) -> Arc<SystemHealth> {
        self.health.latest()
    }

    /// Stored results, oldest first, optionally for one service
    pub fn get_health_history(
        &self,
        service: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<HealthCheckResult>> {
        if let Some(name) = service {
            self.ensure_service(name)?;
        }
        Ok(self.history.get_history(service, limit))
    }

    pub fn history_statistics(&self, results: &[HealthCheckResult]) -> HistoryStatistics {
        self.history.statistics(results)
    }

    pub fn get_uptime_percentage(&self, service: Option<&str>) -> f64 {
        self.history.get_uptime_percentage(service)
    }

    pub fn get_health_trend(&self, service: Option<&str>) -> HealthTrend {
        self.history.get_health_trend(service)
    }

    pub fn get_all_alerts(&self) -> Vec<Alert> {
        self.alerts.get_all_alerts()
    }

    pub fn active_alerts(&self) -> Vec<Alert> {
        self.alerts.active_alerts()
    }

    pub fn resolved_alerts(&self, limit: Option<usize>) -> Vec<Alert> {
        self.alerts.resolved_alerts(limit)
    }

    pub fn alert_summary(&self) -> AlertSummary {
        self.alerts.summary()
    }

    pub fn resolve_alert(&self, id: &str) -> Result<Alert> {
        self.alerts.resolve_alert(id)
    }

    /// Aggregate and per-service call statistics plus the rate-limit view
    pub fn metrics(&self) -> MetricsReport {
        MetricsReport {
            api: self.metrics.aggregate(),
            services: self.metrics.all_metrics(),
            rate_limit: self.rate_limit(),
        }
    }

    pub fn service_metrics(&self, service: &str) -> Result<ServiceMetrics> {
        self.metrics
            .get_metrics(service)
            .ok_or_else(|| MonitorError::not_found(format!("Unknown service: {}", service)))
    }

    pub fn rate_limit(&self) -> RateLimitSnapshot {
        self.rate_limits.snapshot()
    }

    /// Zero every service's call counters. History and alerts are untouched.
    pub fn reset_metrics(&self) -> BTreeMap<String, ServiceMetrics> {
        self.metrics.reset_all()
    }

    /// Client for business calls that should count towards service metrics
    pub fn client(&self) -> &InstrumentedClient {
        &self.client
    }

    pub fn service_names(&self) -> Vec<String> {
        self.health.service_names()
    }

    pub fn has_service(&self, name: &str) -> bool {
        self.health.has_service(name)
    }

    pub fn aggregator(&self) -> &Arc<HealthAggregator> {
        &self.health
    }

    /// Process uptime
    pub fn uptime(&self) -> Duration {
        self.health.uptime()
    }

    fn ensure_service(&self, name: &str) -> Result<()> {
        if self.has_service(name) {
            Ok(())
        } else {
            Err(MonitorError::not_found(format!("Unknown service: {}", name)))
        }
    }
}
