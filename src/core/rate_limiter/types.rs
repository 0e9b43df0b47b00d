//! Admission control types

use serde::Serialize;

/// Which ceiling a decision was made against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitScope {
    Global,
    Caller,
}

impl RateLimitScope {
    /// Machine-readable error code for rejections
    pub fn code(&self) -> &'static str {
        match self {
            Self::Global => "global_rate_limit_exceeded",
            Self::Caller => "user_rate_limit_exceeded",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Global => "Global rate limit exceeded",
            Self::Caller => "User rate limit exceeded",
        }
    }
}

/// Result of one sliding-window check against a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOutcome {
    /// Whether an entry was added for this request
    pub admitted: bool,
    /// Entries in the window before this request
    pub count: u64,
}

/// Limit headers reported for an admitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitInfo {
    pub limit: u32,
    pub remaining: u32,
    /// Epoch seconds
    pub reset_at: i64,
}

/// A request refused by one of the ceilings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{} (limit {limit})", scope.message())]
pub struct RateLimitRejection {
    pub scope: RateLimitScope,
    pub limit: u32,
    pub remaining: u32,
    /// Epoch seconds
    pub reset_at: i64,
}

/// Admission verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionDecision {
    Admitted(RateLimitInfo),
    Rejected(RateLimitRejection),
}

impl AdmissionDecision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted(_))
    }
}

/// Window store failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateLimitError {
    #[error("Rate limit store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Point-in-time view of the limiter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateLimitStats {
    pub backend: &'static str,
    pub global_current_requests: u64,
    pub global_limit: u32,
    pub global_remaining: u32,
    pub active_callers: usize,
    pub window_size_seconds: u64,
}
