//! Router tests module
//!
//! Shared scripted provider used by the router unit tests.


use crate::core::providers::unified_provider::ProviderError;
use crate::core::traits::{Provider, ProviderSettings};
use crate::core::types::{
    ChatChunk, ChatChoice, ChatDelta, ChatMessage, ChatRequest, ChatResponse, ChatStream,
    ChatStreamChoice, EmbeddingData, EmbeddingRequest, EmbeddingResponse, ModelDescriptor,
    StreamEvent, Usage,
};
use async_trait::async_trait;
use futures::StreamExt;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Provider whose call outcomes are scripted up front.
///
/// Outcomes are consumed in order; once the script is empty every call
/// succeeds unless the provider was built with `failing()`.
pub(crate) struct MockProvider {
    name: String,
    models: Vec<ModelDescriptor>,
    settings: ProviderSettings,
    outcomes: Mutex<VecDeque<bool>>,
    always_fail: bool,
    delay: Duration,
    probe_delay: Duration,
    calls: AtomicUsize,
    probe_ok: AtomicBool,
}

impl MockProvider {
    pub fn new(name: &str, models: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            models: models
                .iter()
                .map(|m| ModelDescriptor::new(*m, 4096))
                .collect(),
            settings: ProviderSettings {
                base_url: format!("http://{}.test", name),
                timeout: Duration::from_secs(5),
                ..Default::default()
            },
            outcomes: Mutex::new(VecDeque::new()),
            always_fail: false,
            delay: Duration::ZERO,
            probe_delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            probe_ok: AtomicBool::new(true),
        }
    }

    pub fn with_outcomes(self, outcomes: &[bool]) -> Self {
        *self.outcomes.lock() = outcomes.iter().copied().collect();
        self
    }

    pub fn failing(mut self) -> Self {
        self.always_fail = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sleep this long inside every health probe
    pub fn with_probe_delay(mut self, delay: Duration) -> Self {
        self.probe_delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    pub fn set_probe_ok(&self, ok: bool) {
        self.probe_ok.store(ok, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn invoke(&self) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let scripted = self.outcomes.lock().pop_front();
        let ok = scripted.unwrap_or(!self.always_fail);
        if ok {
            Ok(())
        } else {
            Err(ProviderError::api_error(&self.name, 500, "scripted failure"))
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    fn config(&self) -> &ProviderSettings {
        &self.settings
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        self.invoke().await?;
        Ok(ChatResponse {
            id: format!("resp-{}", self.name),
            object: "chat.completion".to_string(),
            created: 0,
            model: request.model,
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage::assistant(format!("hello from {}", self.name)),
                finish_reason: None,
            }],
            usage: Usage::new(1, 1),
            provider: None,
        })
    }

    async fn chat_stream(&self, request: ChatRequest) -> Result<ChatStream, ProviderError> {
        self.invoke().await?;
        let chunk = ChatChunk {
            id: format!("chunk-{}", self.name),
            object: "chat.completion.chunk".to_string(),
            created: 0,
            model: request.model,
            choices: vec![ChatStreamChoice {
                index: 0,
                delta: ChatDelta {
                    role: None,
                    content: Some("hi".to_string()),
                },
                finish_reason: None,
            }],
        };
        Ok(futures::stream::iter(vec![StreamEvent::Chunk(chunk), StreamEvent::Done]).boxed())
    }

    async fn embeddings(
        &self,
        request: EmbeddingRequest,
    ) -> Result<EmbeddingResponse, ProviderError> {
        self.invoke().await?;
        Ok(EmbeddingResponse {
            object: "list".to_string(),
            model: request.model,
            data: vec![EmbeddingData {
                object: "embedding".to_string(),
                index: 0,
                embedding: vec![0.1, 0.2],
            }],
            usage: Usage::default(),
            provider: None,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if !self.probe_delay.is_zero() {
            tokio::time::sleep(self.probe_delay).await;
        }
        if self.probe_ok.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ProviderError::provider_unavailable(&self.name, "probe failed"))
        }
    }
}
