//! Core Provider trait definitions
//!
//! Defines the capability contract every backend adapter implements.
//!
//! # Module Organization
//!
//! - `config` - `ProviderSettings`, the static connection settings of an adapter
//!
//! # Design Principles
//!
//! 1. **Request uniformity**: All providers use the same request/response format
//! 2. **Shared handles**: The dispatcher holds `Arc<dyn Provider>` and never owns an adapter exclusively
//! 3. **Async first**: All I/O operations are asynchronous
//! 4. **Static catalog**: `models()` is fixed for the adapter's lifetime

mod config;

pub use config::ProviderSettings;

use crate::core::providers::unified_provider::ProviderError;
use crate::core::types::{
    ChatRequest, ChatResponse, ChatStream, EmbeddingRequest, EmbeddingResponse, ModelDescriptor,
};
use async_trait::async_trait;

/// Backend adapter contract
///
/// # Example
/// ```rust,ignore
/// struct EchoProvider { settings: ProviderSettings, models: Vec<ModelDescriptor> }
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     fn name(&self) -> &str { "echo" }
///     fn models(&self) -> &[ModelDescriptor] { &self.models }
///     fn config(&self) -> &ProviderSettings { &self.settings }
///     async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> { ... }
///     async fn chat_stream(&self, request: ChatRequest) -> Result<ChatStream, ProviderError> { ... }
///     async fn embeddings(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, ProviderError> { ... }
///     async fn health_check(&self) -> Result<(), ProviderError> { Ok(()) }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Unique provider name, used as the registry key
    fn name(&self) -> &str;

    /// Static model catalog
    fn models(&self) -> &[ModelDescriptor];

    /// Connection settings (base URL, timeout, retry hints)
    fn config(&self) -> &ProviderSettings;

    /// Whether the catalog advertises `model`
    fn supports_model(&self, model: &str) -> bool {
        self.models().iter().any(|m| m.name == model)
    }

    /// Chat completion
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError>;

    /// Streaming chat completion
    ///
    /// The returned stream must end with `StreamEvent::Done` or `StreamEvent::Error`.
    async fn chat_stream(&self, request: ChatRequest) -> Result<ChatStream, ProviderError>;

    /// Text embeddings
    async fn embeddings(
        &self,
        request: EmbeddingRequest,
    ) -> Result<EmbeddingResponse, ProviderError>;

    /// Active liveness probe
    async fn health_check(&self) -> Result<(), ProviderError>;
}
