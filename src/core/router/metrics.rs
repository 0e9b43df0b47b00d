//! Per-provider performance metrics
//!
//! Records live inside the manager's registry lock; callers only ever see
//! copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;

/// Smoothing factor of the latency moving average
pub const EMA_ALPHA: f64 = 0.1;
/// Requests that must be seen before errors can mark a provider unhealthy
pub const UNHEALTHY_MIN_REQUESTS: u64 = 10;
/// Error rate above which a provider is marked unhealthy
pub const UNHEALTHY_ERROR_RATE: f64 = 0.5;

/// Provider health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    #[default]
    Healthy,
    Unhealthy,
}

/// Counters and moving-average latency for one provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderMetrics {
    pub request_count: u64,
    pub error_count: u64,
    #[serde(rename = "avg_latency_ms", serialize_with = "serialize_millis")]
    pub avg_latency: Duration,
    pub last_request_time: Option<DateTime<Utc>>,
    pub status: ProviderStatus,
}

fn serialize_millis<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.as_secs_f64() * 1000.0)
}

impl Default for ProviderMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderMetrics {
    /// Fresh, healthy record
    pub fn new() -> Self {
        Self {
            request_count: 0,
            error_count: 0,
            avg_latency: Duration::ZERO,
            last_request_time: None,
            status: ProviderStatus::Healthy,
        }
    }

    /// Record one call outcome.
    ///
    /// Returns `true` when this error just flipped the provider to unhealthy.
    /// Successes never restore health; only an active probe does.
    pub fn record(&mut self, latency: Duration, success: bool) -> bool {
        if self.request_count == 0 {
            self.avg_latency = latency;
        } else {
            let avg = self.avg_latency.as_secs_f64() * (1.0 - EMA_ALPHA)
                + latency.as_secs_f64() * EMA_ALPHA;
            self.avg_latency = Duration::from_secs_f64(avg);
        }
        self.request_count += 1;
        self.last_request_time = Some(Utc::now());

        if success {
            return false;
        }

        self.error_count += 1;
        if self.status == ProviderStatus::Healthy
            && self.request_count > UNHEALTHY_MIN_REQUESTS
            && self.error_rate() > UNHEALTHY_ERROR_RATE
        {
            self.status = ProviderStatus::Unhealthy;
            return true;
        }
        false
    }

    /// Fraction of failed requests, 0 when nothing was recorded
    pub fn error_rate(&self) -> f64 {
        if self.request_count == 0 {
            0.0
        } else {
            self.error_count as f64 / self.request_count as f64
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == ProviderStatus::Healthy
    }
}
