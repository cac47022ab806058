//! REST health endpoint probe

use super::client::InstrumentedClient;
use super::types::ProbeOutcome;
use super::ServiceProbe;
use async_trait::async_trait;
use std::time::Duration;

/// Probes an HTTP API with a GET on its health path; any 2xx is alive
#[derive(Debug, Clone)]
pub struct HttpProbe {
    name: String,
    url: String,
    timeout: Option<Duration>,
    client: InstrumentedClient,
}

impl HttpProbe {
    pub fn new(name: impl Into<String>, url: impl Into<String>, client: InstrumentedClient) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            timeout: None,
            client,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ServiceProbe for HttpProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn probe(&self, timeout: Duration) -> ProbeOutcome {
        let request = self.client.http().get(&self.url);
        self.client
            .send(&self.name, request, timeout)
            .await
            .into_outcome()
    }
}
