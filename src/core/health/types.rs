//! Health probe result types

use serde::Serialize;

/// Outcome of probing one provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    /// Provider name
    pub provider: String,
    /// Whether the probe succeeded within the timeout
    pub healthy: bool,
    /// Probe duration in milliseconds
    pub latency_ms: u64,
    /// Failure description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether the probe changed the provider's status
    pub status_changed: bool,
}
