//! Background probe loop

use super::aggregator::HealthAggregator;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

impl HealthAggregator {
    /// Run a cycle on every tick of `interval` until `shutdown` flips to true.
    ///
    /// A tick that lands while the previous cycle is still running is skipped.
    /// On shutdown the loop waits for the cycle in flight, which is bounded by
    /// the probe timeouts.
    pub fn spawn_probe_loop(
        self: &Arc<Self>,
        interval: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let aggregator = self.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut in_flight: Option<JoinHandle<()>> = None;

            info!("Health probe loop started, interval {:?}", interval);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if in_flight.as_ref().is_some_and(|h| !h.is_finished()) {
                            aggregator.note_skipped();
                            warn!("Previous health check cycle still running, skipping cycle");
                            continue;
                        }

                        let aggregator = aggregator.clone();
                        in_flight = Some(tokio::spawn(async move {
                            aggregator.run_cycle().await;
                        }));
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            if let Some(handle) = in_flight {
                debug!("Waiting for in-flight health check cycle before stopping");
                let _ = handle.await;
            }
            info!("Health probe loop stopped");
        })
    }
}
