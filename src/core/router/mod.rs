//! Dispatch core: provider registry, load balancing, retry and failover
//!
//! ## Module Structure
//!
//! - `config` - Load-balancing strategies and manager settings
//! - `error` - Router error types
//! - `metrics` - Per-provider counters, EMA latency and health status
//! - `load_balancer` - Candidate selection
//! - `manager` - Registry, read APIs and dispatch entry points
//! - `execution` - Retry / failover loop with per-call deadlines

pub mod config;
pub mod error;
pub mod execution;
pub mod load_balancer;
pub mod manager;
pub mod metrics;

#[cfg(test)]
pub(crate) mod tests;

pub use config::{LoadBalanceStrategy, ManagerConfig};
pub use error::RouterError;
pub use load_balancer::{Candidate, LoadBalancer, weighted_score};
pub use manager::ProviderManager;
pub use metrics::{ProviderMetrics, ProviderStatus};
