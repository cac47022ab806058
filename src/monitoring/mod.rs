//! Health monitoring for remote dependencies
//!
//! Probes run on a timer, every outbound call is counted, results land in a
//! bounded history, and failing services raise alerts. [`MonitoringSystem`]
//! ties the pieces together and answers queries from the HTTP layer.

pub mod alerts;
pub mod health;
pub mod history;
pub mod metrics;
pub mod probe;

mod background;
mod report;
mod system;
mod types;


pub use alerts::{AlertManager, AlertSummary};
pub use health::{HealthAggregator, HealthCheckResult, HealthState, SystemHealth};
pub use history::{HealthTrend, HistoryStatistics, HistoryStore};
pub use metrics::{MetricsRecorder, RateLimitSnapshot, RateLimitTracker, ServiceMetrics};
pub use probe::{InstrumentedClient, ProbeError, ProbeOutcome, ServiceProbe};
pub use report::HealthReport;
pub use system::MonitoringSystem;
pub use types::{Alert, AlertSeverity, MetricsReport};
