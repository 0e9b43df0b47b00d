//! Integration tests
//!
//! Each module drives the crate through its public API only.

pub mod config_tests;
pub mod dispatch_tests;
pub mod health_tests;
pub mod server_tests;
