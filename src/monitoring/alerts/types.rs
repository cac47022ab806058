//! Alert storage and summary types

use crate::monitoring::health::HealthState;
use crate::monitoring::types::Alert;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Everything the alert manager tracks, behind a single lock
#[derive(Debug, Default)]
pub(super) struct AlertStorage {
    /// Every alert ever raised, in creation order
    pub alerts: Vec<Alert>,
    /// Alert ID to position in `alerts`
    pub index: HashMap<String, usize>,
    /// Unresolved alert ID per (service, condition)
    pub active: HashMap<(String, HealthState), String>,
    /// Delivery statistics
    pub stats: AlertStats,
}

impl AlertStorage {
    pub fn insert(&mut self, alert: Alert) {
        let key = (alert.service.clone(), alert.condition);
        self.index.insert(alert.id.clone(), self.alerts.len());
        self.active.insert(key, alert.id.clone());
        self.stats.total_created += 1;
        self.alerts.push(alert);
    }

    pub fn has_active(&self, service: &str, condition: HealthState) -> bool {
        self.active.contains_key(&(service.to_string(), condition))
    }
}

/// Alert delivery statistics
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStats {
    /// Alerts created since start
    pub total_created: u64,
    /// Successful channel deliveries
    pub notifications_sent: u64,
    /// Failed channel deliveries
    pub failed_notifications: u64,
    /// Creation time of the newest alert
    pub last_alert: Option<chrono::DateTime<chrono::Utc>>,
}

/// Counts served by the alerts endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSummary {
    pub total: usize,
    pub active: usize,
    pub resolved: usize,
    /// Active alerts per severity
    pub by_severity: BTreeMap<String, usize>,
    /// Active alerts per service
    pub by_service: BTreeMap<String, usize>,
}
