//! Router configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::{debug, warn};

impl Validate for RouterConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating router configuration");

        self.retry.validate()?;
        self.health_check.validate()?;

        Ok(())
    }
}

impl Validate for RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.max_attempts == 0 {
            warn!("Retry max_attempts is 0; every dispatch still makes one attempt");
        }
        Ok(())
    }
}

impl Validate for HealthCheckConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }

        if self.interval_secs == 0 {
            return Err("Health check interval must be greater than 0".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Health check timeout must be greater than 0".to_string());
        }

        if self.timeout_secs > self.interval_secs {
            return Err("Health check timeout cannot exceed the interval".to_string());
        }

        Ok(())
    }
}
