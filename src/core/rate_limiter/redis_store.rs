//! Redis-backed window store

use super::store::WindowStore;
use super::types::{RateLimitError, WindowOutcome};
use crate::storage::redis::RedisPool;
use crate::utils::error::GatewayError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Window store shared by every gateway instance pointing at the same Redis
#[derive(Debug, Clone)]
pub struct RedisWindowStore {
    pool: RedisPool,
}

impl RedisWindowStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

fn unavailable(err: GatewayError) -> RateLimitError {
    RateLimitError::StoreUnavailable(err.to_string())
}

#[async_trait]
impl WindowStore for RedisWindowStore {
    async fn admit(
        &self,
        key: &str,
        limit: u32,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Result<WindowOutcome, RateLimitError> {
        let (admitted, count) = self
            .pool
            .sliding_window_admit(key, limit, window, now.timestamp_micros())
            .await
            .map_err(unavailable)?;
        Ok(WindowOutcome { admitted, count })
    }

    async fn count(
        &self,
        key: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Result<u64, RateLimitError> {
        self.pool
            .sliding_window_count(key, window, now.timestamp_micros())
            .await
            .map_err(unavailable)
    }

    // Expired keys are dropped by their TTL on the server.
    async fn active_keys(
        &self,
        prefix: &str,
        _window: Duration,
        _now: DateTime<Utc>,
    ) -> Result<usize, RateLimitError> {
        self.pool
            .count_keys(&format!("{}*", prefix))
            .await
            .map_err(unavailable)
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
