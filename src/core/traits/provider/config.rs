//! Provider connection settings

use serde::Serialize;
use std::time::Duration;

/// Static connection settings exposed by every adapter
///
/// `timeout` is the deadline the dispatcher enforces around each call.
/// `retry_count` and `retry_delay` are advisory: retry policy is owned by the
/// dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSettings {
    /// Backend base URL
    pub base_url: String,
    /// Per-call deadline
    pub timeout: Duration,
    /// Advisory retry count
    pub retry_count: u32,
    /// Advisory retry delay
    pub retry_delay: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Duration::from_secs(30),
            retry_count: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}
