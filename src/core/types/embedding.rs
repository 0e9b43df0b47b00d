//! Embedding request and response types

use super::chat::Usage;
use serde::{Deserialize, Serialize};

/// Embedding request
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmbeddingRequest {
    /// Model name
    pub model: String,
    /// Input texts
    pub input: Vec<String>,
    /// End-user identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// A single embedding vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingData {
    #[serde(default = "default_embedding_object")]
    pub object: String,
    pub index: u32,
    pub embedding: Vec<f32>,
}

fn default_embedding_object() -> String {
    "embedding".to_string()
}

/// Embedding response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    #[serde(default = "default_list_object")]
    pub object: String,
    pub model: String,
    pub data: Vec<EmbeddingData>,
    #[serde(default)]
    pub usage: Usage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

fn default_list_object() -> String {
    "list".to_string()
}
