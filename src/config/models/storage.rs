//! Storage configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Redis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Use Redis for admission windows (in-memory windows otherwise)
    #[serde(default)]
    pub enabled: bool,
    /// Redis URL
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_redis_url(),
            connection_timeout: default_connection_timeout(),
        }
    }
}
