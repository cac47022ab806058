//! HTTP client that records every dependency call

use super::types::{ProbeError, Timed};
use crate::monitoring::metrics::{MetricsRecorder, RateLimitTracker};
use crate::utils::error::Result;
use reqwest::{RequestBuilder, Response, StatusCode};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// User agent sent on every outbound call
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Wraps `reqwest::Client` so that each call feeds the metrics recorder and
/// the rate-limit tracker, including calls that time out.
#[derive(Debug, Clone)]
pub struct InstrumentedClient {
    http: reqwest::Client,
    metrics: Arc<MetricsRecorder>,
    rate_limits: Arc<RateLimitTracker>,
}

impl InstrumentedClient {
    /// Create a client with its own connection pool
    pub fn new(metrics: Arc<MetricsRecorder>, rate_limits: Arc<RateLimitTracker>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self::with_client(http, metrics, rate_limits))
    }

    pub fn with_client(
        http: reqwest::Client,
        metrics: Arc<MetricsRecorder>,
        rate_limits: Arc<RateLimitTracker>,
    ) -> Self {
        Self {
            http,
            metrics,
            rate_limits,
        }
    }

    /// Underlying client, for building requests
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn metrics(&self) -> &Arc<MetricsRecorder> {
        &self.metrics
    }

    /// Run one dependency call under `timeout` and record its outcome
    pub async fn call<T, Fut>(&self, service: &str, timeout: Duration, call: Fut) -> Timed<T>
    where
        Fut: Future<Output = std::result::Result<T, ProbeError>>,
    {
        let timeout_ms = timeout.as_millis() as u64;
        let start = Instant::now();

        let result = match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout(timeout_ms)),
        };

        let elapsed = start.elapsed();
        let elapsed_ms = elapsed.as_millis() as u64;
        let latency = elapsed.as_secs_f64() * 1000.0;

        match &result {
            Ok(_) => self.metrics.record_success(service, latency),
            Err(e) => {
                debug!(service, elapsed_ms, "Dependency call failed: {}", e);
                self.metrics.record_error(service, latency);
            }
        }

        Timed { result, elapsed_ms }
    }

    /// Send a request and require a success status
    pub async fn send(&self, service: &str, request: RequestBuilder, timeout: Duration) -> Timed<Response> {
        let timeout_ms = timeout.as_millis() as u64;
        self.call(service, timeout, self.checked(request, timeout_ms))
            .await
    }

    /// Send a request, observe quota headers and classify the status code.
    ///
    /// Not instrumented on its own; wrap it in [`call`](Self::call).
    pub async fn checked(
        &self,
        request: RequestBuilder,
        timeout_ms: u64,
    ) -> std::result::Result<Response, ProbeError> {
        let response = request
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(&e, timeout_ms))?;

        self.rate_limits.observe_headers(response.headers());

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProbeError::RateLimited);
        }
        if !status.is_success() {
            return Err(ProbeError::HttpStatus(status.as_u16()));
        }

        Ok(response)
    }
}
