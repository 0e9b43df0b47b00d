//! Dispatch manager configuration
//!
//! Defines the load-balancing strategies and the retry / health-check knobs
//! the manager runs with.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Load-balancing strategy
///
/// ## Strategies
///
/// - **RoundRobin**: rotate through the candidates with a shared counter (default)
/// - **Random**: uniform random pick
/// - **LeastRequests**: fewest lifetime requests, ties go to the lowest name
/// - **Weighted**: score from error rate and average latency, highest wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadBalanceStrategy {
    #[default]
    RoundRobin,
    Random,
    LeastRequests,
    Weighted,
}

impl std::fmt::Display for LoadBalanceStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::RoundRobin => "round_robin",
            Self::Random => "random",
            Self::LeastRequests => "least_requests",
            Self::Weighted => "weighted",
        };
        f.write_str(name)
    }
}

/// Manager configuration
///
/// ## Defaults
///
/// - `strategy`: RoundRobin
/// - `health_check_enabled`: true, every 30s with a 5s probe timeout
/// - `retry_enabled`: true, 3 attempts, 1s apart
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerConfig {
    pub strategy: LoadBalanceStrategy,
    pub health_check_enabled: bool,
    pub health_check_interval: Duration,
    pub health_check_timeout: Duration,
    pub retry_enabled: bool,
    /// Total attempts per dispatch (first call included)
    pub max_attempts: u32,
    /// Fixed pause between attempts
    pub retry_delay: Duration,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            strategy: LoadBalanceStrategy::RoundRobin,
            health_check_enabled: true,
            health_check_interval: Duration::from_secs(30),
            health_check_timeout: Duration::from_secs(5),
            retry_enabled: true,
            max_attempts: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

impl ManagerConfig {
    /// Number of attempts a dispatch may make
    pub fn effective_attempts(&self) -> u32 {
        if self.retry_enabled {
            self.max_attempts.max(1)
        } else {
            1
        }
    }
}
