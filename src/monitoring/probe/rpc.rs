//! JSON-RPC node probe

use super::client::InstrumentedClient;
use super::types::{ProbeError, ProbeOutcome};
use super::ServiceProbe;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;

/// Probes a JSON-RPC endpoint with a cheap read-only call.
///
/// The node is alive when it answers 2xx with a `result` and no `error`.
#[derive(Debug, Clone)]
pub struct RpcProbe {
    name: String,
    url: String,
    method: String,
    timeout: Option<Duration>,
    client: InstrumentedClient,
}

impl RpcProbe {
    pub fn new(name: impl Into<String>, url: impl Into<String>, client: InstrumentedClient) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            method: crate::config::default_rpc_method(),
            timeout: None,
            client,
        }
    }

    /// Use a different RPC method
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Override the aggregator's default timeout
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn request_body(&self) -> Value {
        json!({
            "jsonrpc": "2.0",
            "method": self.method,
            "params": [],
            "id": 1,
        })
    }
}

/// Accept only a JSON-RPC success envelope
pub(super) fn check_rpc_body(body: &Value) -> Result<(), ProbeError> {
    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(ProbeError::InvalidResponse(format!("RPC error: {}", message)));
    }

    if body.get("result").is_none() {
        return Err(ProbeError::InvalidResponse(
            "RPC response has no result".to_string(),
        ));
    }

    Ok(())
}

#[async_trait]
impl ServiceProbe for RpcProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn probe(&self, timeout: Duration) -> ProbeOutcome {
        let timeout_ms = timeout.as_millis() as u64;
        let request = self.client.http().post(&self.url).json(&self.request_body());

        let call = async {
            let response = self.client.checked(request, timeout_ms).await?;
            let body: Value = response
                .json()
                .await
                .map_err(|e| ProbeError::InvalidResponse(e.to_string()))?;
            check_rpc_body(&body)
        };

        self.client.call(&self.name, timeout, call).await.into_outcome()
    }
}
