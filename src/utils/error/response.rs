//! HTTP response handling for errors

use super::types::GatewayError;
use crate::core::providers::unified_provider::ProviderError;
use crate::core::rate_limiter::RateLimitRejection;
use crate::core::router::RouterError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

/// Standard error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: &'static str,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, error_type: &'static str, code: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                error_type,
                code: code.into(),
                details: None,
            },
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.error.details = Some(details);
        self
    }
}

impl From<&RateLimitRejection> for ErrorResponse {
    fn from(rejection: &RateLimitRejection) -> Self {
        ErrorResponse::new(
            rejection.scope.message(),
            "rate_limit_error",
            rejection.scope.code(),
        )
        .with_details(serde_json::json!({
            "limit": rejection.limit,
            "remaining": rejection.remaining,
            "reset_at": rejection.reset_at,
        }))
    }
}

fn status_of(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY)
}

fn provider_parts(err: &ProviderError) -> (StatusCode, &'static str, &'static str) {
    let status = status_of(err.http_status());
    match err {
        ProviderError::RateLimit { .. } => (status, "rate_limit_error", "provider_rate_limit"),
        ProviderError::Authentication { .. } => (status, "authentication_error", "provider_auth_error"),
        ProviderError::InvalidRequest { .. } => (status, "invalid_request_error", "invalid_request"),
        ProviderError::ModelNotFound { .. } => (status, "invalid_request_error", "model_not_found"),
        ProviderError::Timeout { .. } => (status, "api_error", "provider_timeout"),
        ProviderError::ProviderUnavailable { .. } => (status, "api_error", "provider_unavailable"),
        _ => (status, "api_error", "provider_error"),
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Router(RouterError::NoCandidate { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Router(err) => match err.provider_error() {
                Some(provider_error) => provider_parts(provider_error).0,
                None => StatusCode::INTERNAL_SERVER_ERROR,
            },
            GatewayError::Provider(err) => provider_parts(err).0,
            GatewayError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::RateLimitStore(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::BadRequest(_) | GatewayError::Serialization(_) => StatusCode::BAD_REQUEST,
            GatewayError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            GatewayError::Router(RouterError::NoCandidate { model }) => ErrorResponse::new(
                format!("No available provider for model: {}", model),
                "service_unavailable_error",
                "no_available_provider",
            ),
            GatewayError::Router(err) => match err.provider_error() {
                Some(provider_error) => {
                    let (_, error_type, code) = provider_parts(provider_error);
                    ErrorResponse::new(err.to_string(), error_type, code)
                }
                None => ErrorResponse::new(err.to_string(), "api_error", "routing_error"),
            },
            GatewayError::Provider(err) => {
                let (_, error_type, code) = provider_parts(err);
                ErrorResponse::new(err.to_string(), error_type, code)
            }
            GatewayError::RateLimited(rejection) => ErrorResponse::from(rejection),
            GatewayError::RateLimitStore(_) => ErrorResponse::new(
                "Rate limiting is temporarily unavailable",
                "service_unavailable_error",
                "rate_limit_store_unavailable",
            ),
            GatewayError::BadRequest(_) | GatewayError::Serialization(_) => {
                ErrorResponse::new(self.to_string(), "invalid_request_error", "bad_request")
            }
            GatewayError::Timeout(_) => ErrorResponse::new(self.to_string(), "api_error", "timeout"),
            _ => ErrorResponse::new("An internal error occurred", "api_error", "internal_error"),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
