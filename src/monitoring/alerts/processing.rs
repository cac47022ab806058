//! Alert notification dispatch

use super::manager::AlertManager;
use crate::monitoring::types::Alert;
use tracing::{debug, warn};

impl AlertManager {
    /// Deliver every queued alert to the channels that accept its severity.
    ///
    /// Delivery failures are logged and counted, never returned. Returns the
    /// number of alerts taken from the queue.
    pub async fn process_pending(&self) -> usize {
        let alerts_to_process: Vec<Alert> = self.pending_alerts.lock().drain(..).collect();
        if alerts_to_process.is_empty() {
            return 0;
        }

        // Snapshot so no lock is held while sending
        let channels = self.notification_channels.read().clone();

        let (mut delivered, mut failed) = (0u64, 0u64);
        for alert in &alerts_to_process {
            for channel in channels.iter().filter(|c| c.supports_severity(alert.severity)) {
                match channel.send(alert).await {
                    Ok(()) => {
                        debug!("Alert {} sent via {}", alert.id, channel.name());
                        delivered += 1;
                    }
                    Err(e) => {
                        warn!("Failed to send alert {} via {}: {}", alert.id, channel.name(), e);
                        failed += 1;
                    }
                }
            }
        }

        self.record_delivery(delivered, failed);
        alerts_to_process.len()
    }
}
