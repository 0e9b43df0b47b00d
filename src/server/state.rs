//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::rate_limiter::SlidingWindowRateLimiter;
use crate::core::router::ProviderManager;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Every field is an `Arc`, so cloning the state per worker is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Provider registry and dispatcher
    pub manager: Arc<ProviderManager>,
    /// Admission control
    pub limiter: Arc<SlidingWindowRateLimiter>,
}

impl AppState {
    pub fn new(
        config: Config,
        manager: Arc<ProviderManager>,
        limiter: Arc<SlidingWindowRateLimiter>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            manager,
            limiter,
        }
    }
}
