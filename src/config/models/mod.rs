//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

pub mod gateway;
pub mod logging;
pub mod provider;
pub mod rate_limit;
pub mod router;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use gateway::*;
pub use logging::*;
pub use provider::*;
pub use rate_limit::*;
pub use router::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

/// Default attempts per dispatch
pub fn default_max_attempts() -> u32 {
    3
}

/// Default pause between attempts in milliseconds
pub fn default_retry_delay_ms() -> u64 {
    1000
}

pub fn default_health_check_interval() -> u64 {
    30
}

pub fn default_health_check_timeout() -> u64 {
    5
}

pub fn default_global_limit() -> u32 {
    1000
}

pub fn default_user_limit() -> u32 {
    60
}

pub fn default_window_secs() -> u64 {
    60
}

pub fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
