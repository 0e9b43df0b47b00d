//! Provider health checking
//!
//! # Module Structure
//!
//! - `types` - Probe result types
//! - `checker` - Periodic prober and its task handle
//! - `tests` - Test suite for health checking

pub mod checker;
pub mod types;

pub use checker::{HealthChecker, HealthCheckerHandle};
pub use types::ProbeResult;
