//! HTTP server implementation
//!
//! Read-only health, metrics and alert endpoints over the monitoring system,
//! plus the two write operations: metrics reset and alert resolution.

pub mod builder;
pub mod routes;
pub mod server;
pub mod state;
pub mod types;


pub use builder::{ServerBuilder, run_server};
pub use server::HttpServer;
pub use state::AppState;
