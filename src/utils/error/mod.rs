//! Error handling for the monitor
//!
//! This module defines the error type used throughout the crate and its HTTP mapping.

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{MonitorError, Result};
