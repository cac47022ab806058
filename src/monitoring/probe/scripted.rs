//! Probe with canned outcomes, for tests

use super::{ProbeError, ProbeOutcome, ServiceProbe};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// Replays a script of outcomes, then keeps succeeding
#[derive(Debug)]
pub(crate) struct ScriptedProbe {
    name: String,
    script: Mutex<VecDeque<ProbeOutcome>>,
    delay: Duration,
}

impl ScriptedProbe {
    pub fn new(name: &str, script: Vec<ProbeOutcome>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            script: Mutex::new(script.into()),
            delay: Duration::ZERO,
        })
    }

    /// Sleeps for `delay` on every probe before answering
    pub fn slow(name: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            script: Mutex::new(VecDeque::new()),
            delay,
        })
    }

    /// Queue more outcomes
    pub fn push(&self, outcome: ProbeOutcome) {
        self.script.lock().push_back(outcome);
    }
}

#[async_trait::async_trait]
impl ServiceProbe for ScriptedProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn probe(&self, _timeout: Duration) -> ProbeOutcome {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let next = self.script.lock().pop_front();
        next.unwrap_or_else(|| ProbeOutcome::success(10))
    }
}

pub(crate) fn ok(response_time_ms: u64) -> ProbeOutcome {
    ProbeOutcome::success(response_time_ms)
}

pub(crate) fn refused() -> ProbeOutcome {
    ProbeOutcome::failure(5, ProbeError::Connection("connection refused".to_string()))
}

pub(crate) fn timed_out(timeout_ms: u64) -> ProbeOutcome {
    ProbeOutcome::failure(timeout_ms, ProbeError::Timeout(timeout_ms))
}
