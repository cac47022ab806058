//! Common test utilities for chainwatch

pub mod assertions;
pub mod fixtures;
pub mod probes;

pub use fixtures::ConfigFactory;
pub use probes::ScriptedProbe;
