//! Configuration management for the Gateway
//!
//! This module handles loading, validation, and management of all gateway configuration.
//! YAML files may reference environment variables as `${VAR}`; they are expanded
//! before parsing.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{GatewayError, Result};
use regex::{Captures, Regex};
use std::path::Path;
use tracing::{debug, info, warn};

/// Main configuration struct for the Gateway
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let expanded = expand_env_vars(content)?;
        let gateway: GatewayConfig = serde_yaml::from_str(&expanded)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { gateway };
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides for the listen address
    pub fn with_server_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.gateway.server.host = host;
        }
        if let Some(port) = port {
            self.gateway.server.port = port;
        }
        self
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.gateway.logging
    }

    /// Get router settings
    pub fn router(&self) -> &RouterConfig {
        &self.gateway.router
    }

    /// Get rate limiting configuration
    pub fn rate_limit(&self) -> &RateLimitConfig {
        &self.gateway.rate_limit
    }

    /// Get Redis configuration
    pub fn redis(&self) -> &RedisConfig {
        &self.gateway.redis
    }

    /// Get providers configuration
    pub fn providers(&self) -> &[ProviderConfig] {
        &self.gateway.providers
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");
        self.gateway
            .validate()
            .map_err(|e| GatewayError::Config(format!("Invalid configuration: {}", e)))
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.gateway)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

/// Replace `${VAR}` references with the variable's value.
///
/// Unset variables expand to an empty string.
pub fn expand_env_vars(input: &str) -> Result<String> {
    let pattern = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
        .map_err(|e| GatewayError::Config(format!("Invalid expansion pattern: {}", e)))?;

    let expanded = pattern.replace_all(input, |caps: &Captures<'_>| {
        let name = &caps[1];
        match std::env::var(name) {
            Ok(value) => value,
            Err(_) => {
                warn!("Environment variable {} is not set", name);
                String::new()
            }
        }
    });
    Ok(expanded.into_owned())
}
