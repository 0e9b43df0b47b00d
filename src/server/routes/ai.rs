//! AI API endpoints (OpenAI compatible)

use crate::core::types::{ChatRequest, ChatStream, EmbeddingRequest, StreamEvent};
use crate::server::state::AppState;
use crate::utils::error::{ErrorResponse, GatewayError};
use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use actix_web::{HttpResponse, web};
use bytes::Bytes;
use futures::StreamExt;
use serde::Serialize;
use tracing::{error, info};

/// Configure AI API routes (mounted under `/v1`)
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/chat/completions", web::post().to(chat_completions))
        .route("/embeddings", web::post().to(embeddings))
        .route("/models", web::get().to(list_models));
}

fn validate_chat(request: &ChatRequest) -> Result<(), GatewayError> {
    if request.model.trim().is_empty() {
        return Err(GatewayError::bad_request("model is required"));
    }
    if request.messages.is_empty() {
        return Err(GatewayError::bad_request("messages must not be empty"));
    }
    Ok(())
}

/// Chat completions endpoint, streamed as SSE when `stream` is set
pub async fn chat_completions(
    state: web::Data<AppState>,
    request: web::Json<ChatRequest>,
) -> Result<HttpResponse, GatewayError> {
    let request = request.into_inner();
    validate_chat(&request)?;
    info!(
        "Chat completion request for model: {} (stream: {})",
        request.model, request.stream
    );

    if request.stream {
        let stream = state.manager.dispatch_stream(request).await?;
        return Ok(HttpResponse::Ok()
            .insert_header((CONTENT_TYPE, "text/event-stream"))
            .insert_header((CACHE_CONTROL, "no-cache"))
            .streaming(sse_body(stream)));
    }

    let response = state.manager.dispatch(request).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Render chat events as SSE frames; the body always ends with `data: [DONE]`
fn sse_body(
    mut stream: ChatStream,
) -> impl futures::Stream<Item = Result<Bytes, GatewayError>> {
    async_stream::stream! {
        while let Some(event) = stream.next().await {
            match event {
                StreamEvent::Chunk(chunk) => match data_frame(&chunk) {
                    Ok(frame) => {
                        yield Ok::<_, GatewayError>(frame);
                    }
                    Err(frame) => {
                        yield Ok(frame);
                        break;
                    }
                },
                StreamEvent::Done => break,
                StreamEvent::Error(e) => {
                    error!("Stream error: {}", e);
                    yield Ok(error_frame(e.to_string()));
                    break;
                }
            }
        }
        yield Ok(Bytes::from_static(b"data: [DONE]\n\n"));
    }
}

/// `data:` frame for one value, or an error frame if it cannot be encoded
fn data_frame<T: Serialize>(value: &T) -> Result<Bytes, Bytes> {
    match serde_json::to_string(value) {
        Ok(json) => Ok(Bytes::from(format!("data: {}\n\n", json))),
        Err(e) => {
            error!("Failed to serialize chunk: {}", e);
            Err(error_frame(format!("failed to encode chunk: {}", e)))
        }
    }
}

fn error_frame(message: String) -> Bytes {
    let body = ErrorResponse::new(message, "api_error", "stream_error");
    let json = serde_json::to_string(&body).unwrap_or_default();
    Bytes::from(format!("event: error\ndata: {}\n\n", json))
}

/// Embeddings endpoint
pub async fn embeddings(
    state: web::Data<AppState>,
    request: web::Json<EmbeddingRequest>,
) -> Result<HttpResponse, GatewayError> {
    let request = request.into_inner();
    if request.model.trim().is_empty() {
        return Err(GatewayError::bad_request("model is required"));
    }
    if request.input.is_empty() {
        return Err(GatewayError::bad_request("input must not be empty"));
    }
    info!("Embedding request for model: {}", request.model);

    let response = state.manager.dispatch_embeddings(request).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Aggregated model catalog across registered providers
pub async fn list_models(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "object": "list",
        "data": state.manager.list_models(),
    }))
}
