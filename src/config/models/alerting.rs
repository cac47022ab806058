//! Alerting configuration

use super::*;
use crate::monitoring::AlertSeverity;
use serde::{Deserialize, Serialize};

/// Alert notification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertingConfig {
    /// Log every new alert through tracing
    #[serde(default = "default_true")]
    pub log_alerts: bool,
    /// Slack-compatible webhook for new alerts
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Minimum severity delivered to the webhook
    #[serde(default = "default_webhook_severity")]
    pub webhook_min_severity: AlertSeverity,
    /// Seconds between notification dispatch runs
    #[serde(default = "default_dispatch_interval")]
    pub dispatch_interval_secs: u64,
}

fn default_webhook_severity() -> AlertSeverity {
    AlertSeverity::High
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            log_alerts: true,
            webhook_url: None,
            webhook_min_severity: default_webhook_severity(),
            dispatch_interval_secs: default_dispatch_interval(),
        }
    }
}

impl AlertingConfig {
    /// Validate alerting configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(webhook) = &self.webhook_url {
            url::Url::parse(webhook).map_err(|e| format!("Invalid alert webhook URL: {}", e))?;
        }

        if self.dispatch_interval_secs == 0 {
            return Err("Alert dispatch interval cannot be 0".to_string());
        }

        Ok(())
    }
}
