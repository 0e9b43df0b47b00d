//! Admission control configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sliding-window rate limiting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable admission control
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Requests admitted per window across all callers
    #[serde(default = "default_global_limit")]
    pub global_limit: u32,
    /// Requests admitted per window for one caller
    #[serde(default = "default_user_limit")]
    pub user_limit: u32,
    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// Admit requests when the window store cannot be reached
    #[serde(default = "default_true")]
    pub fail_open: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            global_limit: default_global_limit(),
            user_limit: default_user_limit(),
            window_secs: default_window_secs(),
            fail_open: true,
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}
