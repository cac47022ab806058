//! Outbound call instrumentation
//!
//! Every call to a monitored dependency is counted here, whether it comes from
//! a probe or from business code using the instrumented client.

mod rate_limit;
mod recorder;
mod types;


pub use rate_limit::RateLimitTracker;
pub use recorder::MetricsRecorder;
pub use types::{RateLimitInfo, RateLimitSnapshot, ServiceMetrics};
