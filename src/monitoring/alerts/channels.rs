//! Notification channel implementations

use crate::monitoring::types::{Alert, AlertSeverity};
use crate::utils::error::{MonitorError, Result};
use std::time::Duration;
use tracing::{info, warn};

/// Notification channel trait
#[async_trait::async_trait]
pub trait NotificationChannel: Send + Sync + std::fmt::Debug {
    /// Send a notification
    async fn send(&self, alert: &Alert) -> Result<()>;

    /// Get channel name
    fn name(&self) -> &str;

    /// Check if channel supports severity level
    fn supports_severity(&self, severity: AlertSeverity) -> bool;
}

/// Writes alerts to the tracing log
#[derive(Debug, Clone)]
pub struct LogChannel {
    min_severity: AlertSeverity,
}

impl LogChannel {
    pub fn new(min_severity: AlertSeverity) -> Self {
        Self { min_severity }
    }
}

impl Default for LogChannel {
    fn default() -> Self {
        Self::new(AlertSeverity::Low)
    }
}

#[async_trait::async_trait]
impl NotificationChannel for LogChannel {
    async fn send(&self, alert: &Alert) -> Result<()> {
        match alert.severity {
            AlertSeverity::High | AlertSeverity::Critical => warn!(
                alert_id = %alert.id,
                service = %alert.service,
                severity = alert.severity.as_str(),
                "ALERT: {}",
                alert.message
            ),
            AlertSeverity::Low | AlertSeverity::Medium => info!(
                alert_id = %alert.id,
                service = %alert.service,
                severity = alert.severity.as_str(),
                "ALERT: {}",
                alert.message
            ),
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }

    fn supports_severity(&self, severity: AlertSeverity) -> bool {
        severity >= self.min_severity
    }
}

/// Slack-compatible incoming webhook
#[derive(Debug)]
pub struct WebhookChannel {
    webhook_url: String,
    username: Option<String>,
    min_severity: AlertSeverity,
    client: reqwest::Client,
}

impl WebhookChannel {
    /// Create a new webhook notification channel
    pub fn new(webhook_url: String, username: Option<String>, min_severity: AlertSeverity) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            webhook_url,
            username,
            min_severity,
            client,
        }
    }

    pub(super) fn payload(&self, alert: &Alert) -> serde_json::Value {
        let color = match alert.severity {
            AlertSeverity::Low => "#36a64f",
            AlertSeverity::Medium => "#ff9500",
            AlertSeverity::High => "#ff0000",
            AlertSeverity::Critical => "#8b0000",
        };

        serde_json::json!({
            "username": self.username.as_deref().unwrap_or("chainwatch"),
            "attachments": [{
                "color": color,
                "title": format!("{} is {}", alert.service, alert.condition),
                "text": alert.message,
                "fields": [
                    {
                        "title": "Severity",
                        "value": alert.severity.to_string(),
                        "short": true
                    },
                    {
                        "title": "Service",
                        "value": alert.service,
                        "short": true
                    },
                    {
                        "title": "Time",
                        "value": alert.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                        "short": true
                    }
                ],
                "footer": format!("Alert {}", alert.id),
                "ts": alert.timestamp.timestamp()
            }]
        })
    }
}

#[async_trait::async_trait]
impl NotificationChannel for WebhookChannel {
    async fn send(&self, alert: &Alert) -> Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&self.payload(alert))
            .send()
            .await
            .map_err(|e| MonitorError::alert(format!("Failed to send webhook notification: {}", e)))?;

        if !response.status().is_success() {
            return Err(MonitorError::alert(format!(
                "Webhook returned status: {}",
                response.status()
            )));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "webhook"
    }

    fn supports_severity(&self, severity: AlertSeverity) -> bool {
        severity >= self.min_severity
    }
}
