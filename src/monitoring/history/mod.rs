//! Bounded health check history with uptime and trend queries

mod bounded;
mod store;
mod types;


pub use store::HistoryStore;
pub use types::{HealthTrend, HistoryStatistics};
