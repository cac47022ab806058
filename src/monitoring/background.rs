//! Background task implementations for MonitoringSystem

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::alerts::AlertManager;
use super::system::MonitoringSystem;

impl MonitoringSystem {
    /// Spawn the probe loop and the alert dispatcher
    pub(super) fn spawn_background_tasks(&self, shutdown: watch::Receiver<bool>) -> Vec<JoinHandle<()>> {
        vec![
            self.health.spawn_probe_loop(self.interval, shutdown.clone()),
            spawn_alert_dispatcher(self.alerts.clone(), self.dispatch_interval, shutdown),
        ]
    }
}

/// Deliver queued alerts every `interval`, flushing once more on shutdown
fn spawn_alert_dispatcher(
    alerts: AlertManager,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let processed = alerts.process_pending().await;
                    if processed > 0 {
                        debug!("Dispatched {} alert(s)", processed);
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        alerts.process_pending().await;
        info!("Alert dispatcher stopped");
    })
}
