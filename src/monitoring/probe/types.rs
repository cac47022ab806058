//! Probe outcome types

use thiserror::Error;

/// Why a dependency call failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// No response within the timeout
    #[error("timed out after {0}ms")]
    Timeout(u64),

    /// Could not reach the service
    #[error("connection failed: {0}")]
    Connection(String),

    /// Service answered with a non-success status
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Service answered but the body was not what a healthy service returns
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Service is throttling us
    #[error("rate limited")]
    RateLimited,
}

impl ProbeError {
    /// Classify a transport error from the HTTP client
    pub fn from_reqwest(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout(timeout_ms)
        } else if err.is_decode() || err.is_body() {
            ProbeError::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            ProbeError::HttpStatus(status.as_u16())
        } else {
            ProbeError::Connection(err.to_string())
        }
    }
}

/// Result of a single probe
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    /// Wall time spent on the probe
    pub response_time_ms: u64,
    /// Set when the probe failed
    pub error: Option<ProbeError>,
}

impl ProbeOutcome {
    pub fn success(response_time_ms: u64) -> Self {
        Self {
            response_time_ms,
            error: None,
        }
    }

    pub fn failure(response_time_ms: u64, error: ProbeError) -> Self {
        Self {
            response_time_ms,
            error: Some(error),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// A dependency call with its measured duration
#[derive(Debug)]
pub struct Timed<T> {
    pub result: Result<T, ProbeError>,
    pub elapsed_ms: u64,
}

impl<T> Timed<T> {
    /// Drop the payload, keeping only what a health check needs
    pub fn into_outcome(self) -> ProbeOutcome {
        match self.result {
            Ok(_) => ProbeOutcome::success(self.elapsed_ms),
            Err(e) => ProbeOutcome::failure(self.elapsed_ms, e),
        }
    }
}
