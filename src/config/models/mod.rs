//! Configuration data models
//!
//! This module defines all configuration structures used by the monitor.

pub mod alerting;
pub mod monitor;
pub mod server;
pub mod service;

// Re-export all configuration types
pub use alerting::*;
pub use monitor::*;
pub use server::*;
pub use service::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default probe interval in seconds
pub fn default_probe_interval() -> u64 {
    30
}

/// Default per-probe timeout in seconds
pub fn default_probe_timeout() -> u64 {
    10
}

/// Consecutive failures before a service is unhealthy
pub fn default_failure_threshold() -> u32 {
    3
}

/// Default number of retained health check results
pub fn default_history_capacity() -> usize {
    1000
}

/// Response time above which the overall status degrades
pub fn default_slow_response_ms() -> u64 {
    5000
}

pub fn default_degraded_penalty() -> u8 {
    20
}

pub fn default_unhealthy_penalty() -> u8 {
    50
}

pub fn default_health_path() -> String {
    "/health".to_string()
}

pub fn default_rpc_method() -> String {
    "eth_blockNumber".to_string()
}

pub fn default_dispatch_interval() -> u64 {
    5
}

pub fn default_cors_max_age() -> u32 {
    3600
}

pub(crate) fn default_true() -> bool {
    true
}
