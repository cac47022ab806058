//! Error types for the monitor

use thiserror::Error;

/// Result type alias for the monitor
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Main error type for the monitor
///
/// Dependency failures never surface here: probes turn them into health data.
/// What remains are configuration problems, lookups of things that do not
/// exist, and genuine bugs.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Alert errors
    #[error("Alert error: {0}")]
    Alert(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
