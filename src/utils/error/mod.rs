//! Error handling for the Gateway
//!
//! `GatewayError` unifies the subsystem errors and maps them to HTTP responses.

mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{GatewayError, Result};
