//! Liveness probes for monitored dependencies
//!
//! A probe makes one bounded-time request and reports a classified outcome.
//! Failures are data, never errors: `probe` cannot fail or panic past its
//! boundary.

mod client;
mod http;
mod rpc;
mod types;

#[cfg(test)]
pub(crate) mod scripted;

pub use client::InstrumentedClient;
pub use http::HttpProbe;
pub use rpc::RpcProbe;
pub use types::{ProbeError, ProbeOutcome, Timed};

use crate::config::{ServiceConfig, ServiceKind};
use std::sync::Arc;
use std::time::Duration;

/// Something the aggregator can ask "are you alive?"
#[async_trait::async_trait]
pub trait ServiceProbe: Send + Sync + std::fmt::Debug {
    /// Service name, unique within a monitor
    fn name(&self) -> &str;

    /// Per-service timeout, overriding the aggregator default
    fn timeout(&self) -> Option<Duration> {
        None
    }

    /// Probe once, finishing within `timeout`
    async fn probe(&self, timeout: Duration) -> ProbeOutcome;
}

/// Build the probe described by a service entry
pub fn build_probe(service: &ServiceConfig, client: InstrumentedClient) -> Arc<dyn ServiceProbe> {
    match service.kind {
        ServiceKind::Rpc => Arc::new(
            RpcProbe::new(&service.name, service.probe_url(), client)
                .with_method(&service.rpc_method)
                .with_timeout(service.timeout()),
        ),
        ServiceKind::Http => Arc::new(
            HttpProbe::new(&service.name, service.probe_url(), client)
                .with_timeout(service.timeout()),
        ),
    }
}
