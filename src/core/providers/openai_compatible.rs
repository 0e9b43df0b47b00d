//! OpenAI-compatible HTTP provider
//!
//! Speaks the `/chat/completions`, `/embeddings` and `/models` endpoints that
//! OpenAI and most hosted backends expose. Streaming responses are decoded
//! from Server-Sent Events.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::debug;

use super::base::{SseDecoder, SseFrame};
use super::unified_provider::ProviderError;
use crate::config::models::provider::ProviderConfig;
use crate::core::traits::{Provider, ProviderSettings};
use crate::core::types::{
    ChatChunk, ChatRequest, ChatResponse, ChatStream, EmbeddingRequest, EmbeddingResponse,
    ModelDescriptor, StreamEvent,
};

/// Adapter for any backend exposing the OpenAI wire format
#[derive(Debug, Clone)]
pub struct OpenAICompatibleProvider {
    name: String,
    api_key: String,
    headers: HashMap<String, String>,
    models: Vec<ModelDescriptor>,
    settings: ProviderSettings,
    client: Client,
}

impl OpenAICompatibleProvider {
    /// Build the adapter from its configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let settings = config.settings();
        let client = Client::builder()
            .connect_timeout(settings.timeout)
            .build()
            .map_err(|e| ProviderError::from_reqwest(&config.name, e))?;

        Ok(Self {
            name: config.name.clone(),
            api_key: config.api_key.clone(),
            headers: config.headers.clone(),
            models: config.models.clone(),
            settings,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let mut builder = builder.bearer_auth(&self.api_key);
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        builder
    }

    /// Send and fail on any non-success status
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ProviderError> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(&self.name, e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!("{} returned {}: {}", self.name, status, body);
        Err(ProviderError::from_status(&self.name, status.as_u16(), body))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ProviderError> {
        let response = self.send(builder).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::from_reqwest(&self.name, e))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ProviderError::response_parsing(&self.name, e.to_string()))
    }
}

/// Turn one SSE frame into a stream event
fn frame_event(provider: &str, frame: SseFrame) -> StreamEvent {
    match frame {
        SseFrame::Done => StreamEvent::Done,
        SseFrame::Data(data) => match serde_json::from_str::<ChatChunk>(&data) {
            Ok(chunk) => StreamEvent::Chunk(chunk),
            Err(e) => StreamEvent::Error(ProviderError::response_parsing(
                provider,
                format!("invalid stream chunk: {}", e),
            )),
        },
    }
}

#[async_trait]
impl Provider for OpenAICompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    fn config(&self) -> &ProviderSettings {
        &self.settings
    }

    async fn chat(&self, mut request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        request.stream = false;
        let builder = self.client.post(self.url("chat/completions")).json(&request);
        self.send_json(builder).await
    }

    async fn chat_stream(&self, mut request: ChatRequest) -> Result<ChatStream, ProviderError> {
        request.stream = true;
        let builder = self
            .client
            .post(self.url("chat/completions"))
            .header("Accept", "text/event-stream")
            .json(&request);
        let response = self.send(builder).await?;

        let name = self.name.clone();
        let mut body = response.bytes_stream();
        let stream = async_stream::stream! {
            let mut decoder = SseDecoder::new();
            'read: loop {
                let frames = match body.next().await {
                    Some(Ok(bytes)) => decoder.push(&bytes),
                    Some(Err(e)) => {
                        yield StreamEvent::Error(ProviderError::streaming(&name, e.to_string()));
                        break 'read;
                    }
                    None => {
                        // Backend closed without the marker
                        let mut rest = decoder.finish();
                        rest.push(SseFrame::Done);
                        rest
                    }
                };
                for frame in frames {
                    let event = frame_event(&name, frame);
                    let terminal = event.is_terminal();
                    yield event;
                    if terminal {
                        break 'read;
                    }
                }
            }
        };
        Ok(stream.boxed())
    }

    async fn embeddings(
        &self,
        request: EmbeddingRequest,
    ) -> Result<EmbeddingResponse, ProviderError> {
        let builder = self.client.post(self.url("embeddings")).json(&request);
        self.send_json(builder).await
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        self.send(self.client.get(self.url("models"))).await?;
        Ok(())
    }
}
