//! Health aggregation
//!
//! Probes run on a fixed schedule. Each service carries a failure streak that
//! decides its status, and every cycle produces a new [`SystemHealth`].

mod aggregator;
mod scoring;
mod tasks;
mod types;


pub use aggregator::{HealthAggregator, PROBE_GRACE};
pub use scoring::{ScoreWeights, classify, health_score, overall_status};
pub use types::{AggregatorSettings, HealthCheckResult, HealthState, SystemHealth};
