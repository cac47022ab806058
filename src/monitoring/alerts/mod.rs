//! Alert management
//!
//! Failing health checks become alerts here; a background dispatcher hands
//! new alerts to the notification channels.

mod channels;
mod manager;
mod processing;
mod types;


pub use channels::{LogChannel, NotificationChannel, WebhookChannel};
pub use manager::AlertManager;
pub use types::{AlertStats, AlertSummary};
