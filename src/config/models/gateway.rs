//! Main gateway configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Main gateway configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Router configuration
    #[serde(default)]
    pub router: RouterConfig,
    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Redis configuration
    #[serde(default)]
    pub redis: RedisConfig,
    /// Provider configurations
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl GatewayConfig {
    /// Providers with `enabled: true`
    pub fn enabled_providers(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter().filter(|p| p.enabled)
    }
}
