//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Manual mocks rather than mockall: the port traits take `&str` and
//! `&serde_json::Value` parameters, and hand-written doubles let tests
//! inspect exactly what was sent.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
