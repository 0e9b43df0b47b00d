//! Router configuration

use super::*;
use crate::core::router::{LoadBalanceStrategy, ManagerConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Router configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RouterConfig {
    /// Load-balancing strategy
    #[serde(default)]
    pub strategy: LoadBalanceStrategy,
    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
    /// Background health checking
    #[serde(default)]
    pub health_check: HealthCheckConfig,
}

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Total attempts per dispatch, first call included
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Fixed delay between attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: default_max_attempts(),
            delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Health check configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between sweeps
    #[serde(default = "default_health_check_interval")]
    pub interval_secs: u64,
    /// Per-probe timeout in seconds
    #[serde(default = "default_health_check_timeout")]
    pub timeout_secs: u64,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: default_health_check_interval(),
            timeout_secs: default_health_check_timeout(),
        }
    }
}

impl RouterConfig {
    /// Settings for the dispatch manager
    pub fn manager_config(&self) -> ManagerConfig {
        ManagerConfig {
            strategy: self.strategy,
            health_check_enabled: self.health_check.enabled,
            health_check_interval: Duration::from_secs(self.health_check.interval_secs),
            health_check_timeout: Duration::from_secs(self.health_check.timeout_secs),
            retry_enabled: self.retry.enabled,
            max_attempts: self.retry.max_attempts,
            retry_delay: Duration::from_millis(self.retry.delay_ms),
        }
    }
}
