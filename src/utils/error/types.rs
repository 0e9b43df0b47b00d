//! Error types for the Gateway

use crate::core::providers::unified_provider::ProviderError;
use crate::core::rate_limiter::{RateLimitError, RateLimitRejection};
use crate::core::router::RouterError;
use thiserror::Error;

/// Result type alias for the Gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the Gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Redis errors
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Dispatch errors
    #[error(transparent)]
    Router(#[from] RouterError),

    /// Provider errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Admission rejections
    #[error(transparent)]
    RateLimited(#[from] RateLimitRejection),

    /// Admission store failures
    #[error(transparent)]
    RateLimitStore(#[from] RateLimitError),

    /// Malformed client requests
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Timeout errors
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Server errors
    #[error("Server error: {0}")]
    Server(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
