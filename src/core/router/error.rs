//! Router error types

use crate::core::providers::unified_provider::ProviderError;

/// Errors surfaced by the dispatch manager
#[derive(Debug, Clone, thiserror::Error)]
pub enum RouterError {
    /// No healthy provider advertises the model. Never retried.
    #[error("No available provider for model: {model}")]
    NoCandidate { model: String },

    /// Every attempt failed; wraps the last provider error
    #[error("All {attempts} attempt(s) failed for model {model}: {source}")]
    ExhaustedRetries {
        model: String,
        attempts: u32,
        #[source]
        source: ProviderError,
    },

    /// Single-shot call (streaming) failed
    #[error("Provider call failed: {0}")]
    Provider(#[from] ProviderError),

    /// Load balancer was handed no candidates
    #[error("Cannot select from an empty candidate set")]
    EmptyCandidateSet,
}

impl RouterError {
    /// Provider error behind this failure, if any
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::ExhaustedRetries { source, .. } => Some(source),
            Self::Provider(err) => Some(err),
            _ => None,
        }
    }
}
