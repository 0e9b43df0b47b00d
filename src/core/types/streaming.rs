//! Incremental chat output

use super::chat::{FinishReason, MessageRole};
use crate::core::providers::unified_provider::ProviderError;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

/// Delta content of a streamed choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChatDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<MessageRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A streamed choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatStreamChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub delta: ChatDelta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

/// One chunk of a streamed chat completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChunk {
    pub id: String,
    #[serde(default = "default_chunk_object")]
    pub object: String,
    #[serde(default)]
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatStreamChoice>,
}

fn default_chunk_object() -> String {
    "chat.completion.chunk".to_string()
}

/// Item of a chat stream. A stream always ends with `Done` or `Error`.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    Chunk(ChatChunk),
    Done,
    Error(ProviderError),
}

impl StreamEvent {
    /// Whether this event terminates the stream
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Done | StreamEvent::Error(_))
    }
}

/// Boxed stream of chat events returned by providers and the dispatcher
pub type ChatStream = BoxStream<'static, StreamEvent>;
