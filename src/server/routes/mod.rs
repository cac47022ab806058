//! HTTP route modules

pub mod alerts;
pub mod health;
pub mod metrics;

use actix_web::web;

/// Number of resolved alerts listed by `GET /alerts`
pub const RECENT_RESOLVED_ALERTS: usize = 20;

/// Default number of entries returned by `GET /health/history`
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Register every endpoint
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    metrics::configure_routes(cfg);
    alerts::configure_routes(cfg);
}
