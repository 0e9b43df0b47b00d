//! Model catalog types

use serde::{Deserialize, Serialize};

/// Static description of a model served by a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Model name as requested by callers
    pub name: String,
    /// Maximum context tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Whether streaming chat is available
    #[serde(default = "default_streaming")]
    pub supports_streaming: bool,
    /// Per-model request ceiling (requests per minute)
    #[serde(default = "default_model_rate_limit")]
    pub rate_limit: u32,
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_streaming() -> bool {
    true
}

fn default_model_rate_limit() -> u32 {
    60
}

impl ModelDescriptor {
    pub fn new(name: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            name: name.into(),
            max_tokens,
            supports_streaming: default_streaming(),
            rate_limit: default_model_rate_limit(),
        }
    }
}

/// Entry of the aggregated `/v1/models` listing
#[derive(Debug, Clone, Serialize)]
pub struct ModelListing {
    pub id: String,
    pub object: &'static str,
    pub owned_by: Vec<String>,
    pub max_tokens: u32,
    pub supports_streaming: bool,
}
