//! Integration tests for chainwatch

pub mod config_tests;
pub mod http_tests;
pub mod probe_tests;
pub mod scenario_tests;
