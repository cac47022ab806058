//! Probes with scripted outcomes
//!
//! Real `ServiceProbe` implementations that replay a queue of outcomes
//! instead of touching the network.

use chainwatch::monitoring::{ProbeError, ProbeOutcome, ServiceProbe};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Replays queued outcomes, then keeps succeeding
#[derive(Debug)]
pub struct ScriptedProbe {
    name: String,
    script: Mutex<VecDeque<ProbeOutcome>>,
    calls: AtomicUsize,
}

impl ScriptedProbe {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn then(self: &Arc<Self>, outcome: ProbeOutcome) -> Arc<Self> {
        self.script.lock().push_back(outcome);
        self.clone()
    }

    pub fn then_timeout(self: &Arc<Self>) -> Arc<Self> {
        self.then(ProbeOutcome::failure(5000, ProbeError::Timeout(5000)))
    }

    pub fn then_refused(self: &Arc<Self>) -> Arc<Self> {
        self.then(ProbeOutcome::failure(
            3,
            ProbeError::Connection("tcp connect error: Connection refused (os error 111)".to_string()),
        ))
    }

    pub fn then_ok(self: &Arc<Self>, response_time_ms: u64) -> Arc<Self> {
        self.then(ProbeOutcome::success(response_time_ms))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ServiceProbe for ScriptedProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn probe(&self, _timeout: Duration) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().pop_front();
        next.unwrap_or_else(|| ProbeOutcome::success(15))
    }
}
