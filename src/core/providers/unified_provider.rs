//! Unified Provider Error Handling
//!
//! Single error type for every backend call made by the gateway.
//!
//! | Variant | Purpose | HTTP Status |
//! |------|------|------------|
//! | Authentication | Backend rejected credentials | 401 |
//! | RateLimit | Backend throttled the call | 429 |
//! | ModelNotFound | Backend does not serve the model | 404 |
//! | InvalidRequest | Backend rejected the payload | 400 |
//! | Network | Transport failure | 502 |
//! | Timeout | Deadline elapsed | 504 |
//! | ProviderUnavailable | Backend is down | 503 |
//! | ApiError | Non-success status | status |
//! | ResponseParsing | Body could not be decoded | 502 |
//! | Streaming | Failure mid-stream | 502 |
//! | NotSupported | Operation not offered | 501 |
//! | Other | Anything else | 500 |
//!
//! Every variant counts as a failed attempt for the dispatcher: retry and
//! failover do not discriminate between error kinds.

/// Unified provider error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("Authentication failed for {provider}: {message}")]
    Authentication { provider: String, message: String },

    #[error("Rate limit exceeded for {provider}: {message}")]
    RateLimit {
        provider: String,
        message: String,
        retry_after: Option<u64>,
    },

    #[error("Model '{model}' not found for {provider}")]
    ModelNotFound { provider: String, model: String },

    #[error("Invalid request for {provider}: {message}")]
    InvalidRequest { provider: String, message: String },

    #[error("Network error for {provider}: {message}")]
    Network { provider: String, message: String },

    #[error("Provider {provider} is unavailable: {message}")]
    ProviderUnavailable { provider: String, message: String },

    #[error("Feature '{feature}' not supported by {provider}")]
    NotSupported { provider: String, feature: String },

    #[error("Timeout for {provider}: {message}")]
    Timeout { provider: String, message: String },

    /// API error with status code
    #[error("API error for {provider} (status {status}): {message}")]
    ApiError {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("Failed to parse {provider} response: {message}")]
    ResponseParsing { provider: String, message: String },

    #[error("Streaming error for {provider}: {message}")]
    Streaming { provider: String, message: String },

    #[error("{provider} error: {message}")]
    Other { provider: String, message: String },
}

impl ProviderError {
    pub fn authentication(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Authentication {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create rate limit error
    pub fn rate_limit(provider: impl Into<String>, retry_after: Option<u64>) -> Self {
        Self::RateLimit {
            provider: provider.into(),
            message: match retry_after {
                Some(seconds) => format!("Rate limit exceeded. Retry after {} seconds", seconds),
                None => "Rate limit exceeded".to_string(),
            },
            retry_after,
        }
    }

    pub fn model_not_found(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self::ModelNotFound {
            provider: provider.into(),
            model: model.into(),
        }
    }

    pub fn invalid_request(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create network error
    pub fn network(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn provider_unavailable(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn not_supported(provider: impl Into<String>, feature: impl Into<String>) -> Self {
        Self::NotSupported {
            provider: provider.into(),
            feature: feature.into(),
        }
    }

    /// Create timeout error
    pub fn timeout(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Timeout {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn api_error(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    pub fn response_parsing(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ResponseParsing {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn streaming(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Streaming {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn other(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Other {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Name of the provider that produced the error
    pub fn provider(&self) -> &str {
        match self {
            Self::Authentication { provider, .. }
            | Self::RateLimit { provider, .. }
            | Self::ModelNotFound { provider, .. }
            | Self::InvalidRequest { provider, .. }
            | Self::Network { provider, .. }
            | Self::ProviderUnavailable { provider, .. }
            | Self::NotSupported { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::ApiError { provider, .. }
            | Self::ResponseParsing { provider, .. }
            | Self::Streaming { provider, .. }
            | Self::Other { provider, .. } => provider,
        }
    }

    /// Map a backend HTTP status to the matching variant
    pub fn from_status(provider: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        let provider = provider.into();
        let body = body.into();
        match status {
            401 | 403 => Self::authentication(provider, body),
            404 => Self::api_error(provider, status, body),
            400 | 422 => Self::invalid_request(provider, body),
            429 => Self::RateLimit {
                provider,
                message: body,
                retry_after: None,
            },
            503 => Self::provider_unavailable(provider, body),
            _ => Self::api_error(provider, status, body),
        }
    }

    /// Map a transport failure from the HTTP client
    pub fn from_reqwest(provider: impl Into<String>, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(provider, err.to_string())
        } else if err.is_decode() {
            Self::response_parsing(provider, err.to_string())
        } else {
            Self::network(provider, err.to_string())
        }
    }

    /// HTTP status code to report when this error reaches a caller
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Authentication { .. } => 401,
            Self::RateLimit { .. } => 429,
            Self::ModelNotFound { .. } => 404,
            Self::InvalidRequest { .. } => 400,
            Self::Network { .. } | Self::ResponseParsing { .. } | Self::Streaming { .. } => 502,
            Self::ProviderUnavailable { .. } => 503,
            Self::NotSupported { .. } => 501,
            Self::Timeout { .. } => 504,
            Self::ApiError { status, .. } => *status,
            Self::Other { .. } => 500,
        }
    }
}
