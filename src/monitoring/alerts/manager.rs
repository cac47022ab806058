//! Alert manager implementation

use super::channels::{LogChannel, NotificationChannel, WebhookChannel};
use super::types::{AlertStats, AlertStorage, AlertSummary};
use crate::config::AlertingConfig;
use crate::monitoring::health::HealthCheckResult;
use crate::monitoring::types::{Alert, AlertSeverity};
use crate::utils::error::{MonitorError, Result};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns failing health checks into deduplicated alerts and queues them
/// for notification.
///
/// At most one unresolved alert exists per (service, condition). Alerts are
/// only resolved explicitly and are kept after resolution.
#[derive(Debug, Clone)]
pub struct AlertManager {
    /// Consecutive failures that make a service unhealthy
    failure_threshold: u32,
    /// Consolidated storage for all alert-related data
    pub(super) storage: Arc<RwLock<AlertStorage>>,
    /// Alerts waiting for the dispatcher
    pub(super) pending_alerts: Arc<Mutex<VecDeque<Alert>>>,
    /// Notification channels
    pub(super) notification_channels: Arc<RwLock<Vec<Arc<dyn NotificationChannel>>>>,
}

impl AlertManager {
    /// Create an alert manager with the channels named in `config`
    pub fn new(config: &AlertingConfig, failure_threshold: u32) -> Self {
        let mut channels: Vec<Arc<dyn NotificationChannel>> = Vec::new();

        if config.log_alerts {
            channels.push(Arc::new(LogChannel::default()));
        }

        if let Some(webhook_url) = &config.webhook_url {
            channels.push(Arc::new(WebhookChannel::new(
                webhook_url.clone(),
                None,
                config.webhook_min_severity,
            )));
        }

        Self::with_channels(channels, failure_threshold)
    }

    pub fn with_channels(channels: Vec<Arc<dyn NotificationChannel>>, failure_threshold: u32) -> Self {
        Self {
            failure_threshold,
            storage: Arc::new(RwLock::new(AlertStorage::default())),
            pending_alerts: Arc::new(Mutex::new(VecDeque::new())),
            notification_channels: Arc::new(RwLock::new(channels)),
        }
    }

    /// Register another notification channel
    pub fn add_channel(&self, channel: Arc<dyn NotificationChannel>) {
        info!("Adding notification channel: {}", channel.name());
        self.notification_channels.write().push(channel);
    }

    /// Raise an alert for a failing result unless one is already open.
    ///
    /// Healthy results never raise alerts.
    pub fn evaluate(&self, result: &HealthCheckResult) -> Option<Alert> {
        if result.status.is_healthy() {
            return None;
        }

        let alert = {
            let mut storage = self.storage.write();
            if storage.has_active(&result.service, result.status) {
                debug!(
                    service = %result.service,
                    condition = %result.status,
                    "Alert already open, not raising another"
                );
                return None;
            }

            let alert = self.build_alert(result);
            storage.stats.last_alert = Some(alert.timestamp);
            storage.insert(alert.clone());
            alert
        };

        self.pending_alerts.lock().push_back(alert.clone());
        info!(
            alert_id = %alert.id,
            service = %alert.service,
            severity = alert.severity.as_str(),
            "Alert raised: {}",
            alert.message
        );

        Some(alert)
    }

    fn build_alert(&self, result: &HealthCheckResult) -> Alert {
        let severity = AlertSeverity::for_failure(
            result.status,
            result.consecutive_failures,
            self.failure_threshold,
        );
        let message = format!(
            "Service '{}' is {} after {} consecutive failed check(s): {}",
            result.service,
            result.status,
            result.consecutive_failures,
            result.error.as_deref().unwrap_or("no error detail")
        );

        Alert {
            id: uuid::Uuid::new_v4().to_string(),
            severity,
            message,
            service: result.service.clone(),
            condition: result.status,
            timestamp: chrono::Utc::now(),
            resolved: false,
            resolved_at: None,
        }
    }

    /// Mark an alert resolved. Unknown and already-resolved IDs are `NotFound`.
    pub fn resolve_alert(&self, id: &str) -> Result<Alert> {
        let mut storage = self.storage.write();

        let position = *storage
            .index
            .get(id)
            .ok_or_else(|| MonitorError::not_found(format!("Alert {} not found", id)))?;

        let alert = &mut storage.alerts[position];
        if alert.resolved {
            return Err(MonitorError::not_found(format!(
                "Alert {} is already resolved",
                id
            )));
        }
        alert.resolved = true;
        alert.resolved_at = Some(chrono::Utc::now());
        let resolved = alert.clone();

        let key = (resolved.service.clone(), resolved.condition);
        if storage.active.get(&key).is_some_and(|active| active == id) {
            storage.active.remove(&key);
        }
        drop(storage);

        info!(alert_id = %id, service = %resolved.service, "Alert resolved");
        Ok(resolved)
    }

    /// Look up one alert
    pub fn get_alert(&self, id: &str) -> Option<Alert> {
        let storage = self.storage.read();
        storage
            .index
            .get(id)
            .and_then(|&i| storage.alerts.get(i))
            .cloned()
    }

    /// Every alert, in creation order
    pub fn get_all_alerts(&self) -> Vec<Alert> {
        self.storage.read().alerts.clone()
    }

    /// Unresolved alerts, in creation order
    pub fn active_alerts(&self) -> Vec<Alert> {
        self.storage
            .read()
            .alerts
            .iter()
            .filter(|a| a.is_active())
            .cloned()
            .collect()
    }

    /// Resolved alerts, most recently resolved first
    pub fn resolved_alerts(&self, limit: Option<usize>) -> Vec<Alert> {
        let mut resolved: Vec<Alert> = self
            .storage
            .read()
            .alerts
            .iter()
            .rev()
            .filter(|a| a.resolved)
            .cloned()
            .collect();

        resolved.sort_by(|a, b| b.resolved_at.cmp(&a.resolved_at));
        if let Some(limit) = limit {
            resolved.truncate(limit);
        }
        resolved
    }

    /// Totals, plus active alerts by severity and by service
    pub fn summary(&self) -> AlertSummary {
        let storage = self.storage.read();

        let mut by_severity: BTreeMap<String, usize> = AlertSeverity::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        let mut by_service = BTreeMap::new();
        let mut active = 0;

        for alert in storage.alerts.iter().filter(|a| a.is_active()) {
            active += 1;
            *by_severity
                .entry(alert.severity.as_str().to_string())
                .or_insert(0) += 1;
            *by_service.entry(alert.service.clone()).or_insert(0) += 1;
        }

        AlertSummary {
            total: storage.alerts.len(),
            active,
            resolved: storage.alerts.len() - active,
            by_severity,
            by_service,
        }
    }

    /// Get alert statistics
    pub fn get_stats(&self) -> AlertStats {
        self.storage.read().stats.clone()
    }

    /// Alerts waiting for dispatch
    pub fn pending_count(&self) -> usize {
        self.pending_alerts.lock().len()
    }

    pub(super) fn record_delivery(&self, delivered: u64, failed: u64) {
        if delivered == 0 && failed == 0 {
            return;
        }
        let mut storage = self.storage.write();
        storage.stats.notifications_sent += delivered;
        storage.stats.failed_notifications += failed;
        if failed > 0 {
            warn!("{} alert notification(s) failed", failed);
        }
    }
}
