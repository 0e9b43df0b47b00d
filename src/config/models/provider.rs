//! Provider configuration

use super::*;
use crate::core::traits::ProviderSettings;
use crate::core::types::ModelDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// One backend served through the OpenAI-compatible adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Unique provider name
    pub name: String,
    /// Base URL, e.g. `https://api.openai.com/v1`
    #[serde(default)]
    pub base_url: String,
    /// API key sent as a bearer token
    #[serde(default)]
    pub api_key: String,
    /// Whether provider is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Advisory retry count
    #[serde(default = "default_max_attempts")]
    pub retry_count: u32,
    /// Advisory retry delay in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Model catalog
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_url: String::new(),
            api_key: String::new(),
            enabled: true,
            timeout: default_timeout(),
            retry_count: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            headers: HashMap::new(),
            models: Vec::new(),
        }
    }
}

impl ProviderConfig {
    /// Connection settings handed to the adapter
    pub fn settings(&self) -> ProviderSettings {
        ProviderSettings {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(self.timeout),
            retry_count: self.retry_count,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}
