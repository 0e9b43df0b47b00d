//! Utility modules for the gateway
//!
//! - **error**: Gateway error type and HTTP error mapping
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{GatewayError, Result};
