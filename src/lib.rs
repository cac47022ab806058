//! # chainwatch
//!
//! Health aggregation and alerting for the remote services a blockchain
//! application depends on: JSON-RPC nodes and explorer-style REST APIs.
//!
//! ## Features
//!
//! - **Probing**: periodic, time-bounded liveness checks run concurrently
//! - **Hysteresis**: one failure degrades a service, repeated failures make it unhealthy, one success recovers it
//! - **Call metrics**: every outbound call is counted, probes and business calls alike
//! - **History**: bounded log of results with uptime and trend queries
//! - **Alerting**: deduplicated alerts with log and webhook notification
//! - **HTTP API**: health, metrics and alert endpoints for dashboards and load balancers
//!
//! ## Embedding
//!
//! ```rust,no_run
//! use chainwatch::{Config, MonitoringSystem};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None).await?;
//!     let monitoring = MonitoringSystem::new(&config)?;
//!     monitoring.start()?;
//!
//!     let health = monitoring.perform_health_check().await;
//!     println!("overall: {} (score {})", health.overall, health.health_score);
//!
//!     monitoring.stop().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod monitoring;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use monitoring::{
    Alert, AlertSeverity, HealthCheckResult, HealthReport, HealthState, MonitoringSystem,
    SystemHealth,
};
pub use utils::error::{MonitorError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information baked in by the build script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Unix time of the build
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

/// Build information of this binary
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        build_time: env!("BUILD_TIME"),
        git_hash: env!("GIT_HASH"),
        rust_version: env!("RUST_VERSION"),
    }
}
