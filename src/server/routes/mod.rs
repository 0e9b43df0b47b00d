//! HTTP route modules
//!
//! - `ai` - OpenAI-compatible endpoints under `/v1`, behind admission control
//! - `health` - Liveness, provider probes and metrics snapshots

pub mod ai;
pub mod health;

/// Envelope for gateway-native (non OpenAI) endpoints
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}
