//! Core configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::{debug, warn};

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating gateway configuration");

        self.server.validate()?;
        self.logging.validate()?;
        self.router.validate()?;
        self.rate_limit.validate()?;
        self.redis.validate()?;

        let mut provider_names = HashSet::new();
        for provider in &self.providers {
            if !provider_names.insert(&provider.name) {
                return Err(format!("Duplicate provider name: {}", provider.name));
            }
            if provider.enabled {
                provider.validate()?;
            }
        }

        if self.enabled_providers().next().is_none() {
            return Err("No providers enabled".to_string());
        }

        debug!("Gateway configuration validation completed");
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if self.max_body_size == 0 {
            return Err("Server max body size must be greater than 0".to_string());
        }

        if self.workers == Some(0) {
            return Err("Server workers must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Provider name cannot be empty".to_string());
        }

        if self.base_url.is_empty() {
            return Err(format!("Provider {}: base_url is required", self.name));
        }
        match url::Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(format!(
                    "Provider {}: unsupported base_url scheme '{}'",
                    self.name,
                    url.scheme()
                ));
            }
            Err(e) => return Err(format!("Provider {}: invalid base_url: {}", self.name, e)),
        }

        if self.api_key.is_empty() {
            return Err(format!("Provider {}: api_key is required", self.name));
        }

        if self.timeout == 0 {
            return Err(format!("Provider {}: timeout must be greater than 0", self.name));
        }

        if self.models.is_empty() {
            return Err(format!(
                "Provider {}: at least one model must be configured",
                self.name
            ));
        }

        for (i, model) in self.models.iter().enumerate() {
            if model.name.is_empty() {
                return Err(format!("Provider {}: model[{}].name is required", self.name, i));
            }
            if model.max_tokens == 0 {
                return Err(format!(
                    "Provider {}: model[{}].max_tokens must be positive",
                    self.name, i
                ));
            }
            if model.rate_limit == 0 {
                return Err(format!(
                    "Provider {}: model[{}].rate_limit must be positive",
                    self.name, i
                ));
            }
        }

        Ok(())
    }
}

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }

        if self.global_limit == 0 {
            return Err("Rate limit global_limit must be greater than 0".to_string());
        }

        if self.user_limit == 0 {
            return Err("Rate limit user_limit must be greater than 0".to_string());
        }

        if self.window_secs == 0 {
            return Err("Rate limit window_secs must be greater than 0".to_string());
        }

        if self.user_limit > self.global_limit {
            warn!(
                "Per-caller limit {} exceeds global limit {}",
                self.user_limit, self.global_limit
            );
        }

        Ok(())
    }
}

impl Validate for RedisConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }

        match url::Url::parse(&self.url) {
            Ok(url) if matches!(url.scheme(), "redis" | "rediss") => {}
            Ok(url) => return Err(format!("Unsupported Redis URL scheme '{}'", url.scheme())),
            Err(e) => return Err(format!("Invalid Redis URL: {}", e)),
        }

        if self.connection_timeout == 0 {
            return Err("Redis connection timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
