//! Per-service classification and composite scoring
//!
//! Degradation is gradual (one failure degrades, `threshold` failures make a
//! service unhealthy) while recovery is immediate on the first success.

use super::types::{HealthCheckResult, HealthState};

/// Health score penalties per non-healthy service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub degraded_penalty: u8,
    pub unhealthy_penalty: u8,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            degraded_penalty: 20,
            unhealthy_penalty: 50,
        }
    }
}

/// Status for a service given its current failure streak
pub fn classify(consecutive_failures: u32, threshold: u32) -> HealthState {
    match consecutive_failures {
        0 => HealthState::Healthy,
        n if n >= threshold.max(1) => HealthState::Unhealthy,
        _ => HealthState::Degraded,
    }
}

/// Overall status: worst service status, degraded as well when any probe was slow
pub fn overall_status(results: &[HealthCheckResult], slow_response_ms: u64) -> HealthState {
    if results.iter().any(|r| r.status == HealthState::Unhealthy) {
        HealthState::Unhealthy
    } else if results
        .iter()
        .any(|r| r.status == HealthState::Degraded || r.response_time_ms > slow_response_ms)
    {
        HealthState::Degraded
    } else {
        HealthState::Healthy
    }
}

/// 0-100 score: 100 minus a penalty per degraded and unhealthy service
pub fn health_score(results: &[HealthCheckResult], weights: ScoreWeights) -> u8 {
    let penalty: u32 = results
        .iter()
        .map(|r| match r.status {
            HealthState::Healthy => 0,
            HealthState::Degraded => weights.degraded_penalty as u32,
            HealthState::Unhealthy => weights.unhealthy_penalty as u32,
        })
        .sum();

    100u32.saturating_sub(penalty) as u8
}
