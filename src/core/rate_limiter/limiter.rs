//! Two-ceiling sliding-window limiter

use super::store::{MemoryWindowStore, WindowStore};
use super::types::{
    AdmissionDecision, RateLimitError, RateLimitInfo, RateLimitRejection, RateLimitScope,
    RateLimitStats, WindowOutcome,
};
use crate::config::models::rate_limit::RateLimitConfig;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Redis key prefix shared by every window
pub const KEY_PREFIX: &str = "rate_limit:";

/// Admission gate checked before dispatch
///
/// Checks the global window first, then the caller's own window. A request
/// that passes the global check but fails the caller check still holds its
/// global slot.
pub struct SlidingWindowRateLimiter {
    store: Arc<dyn WindowStore>,
    config: RateLimitConfig,
}

impl std::fmt::Debug for SlidingWindowRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlidingWindowRateLimiter")
            .field("backend", &self.store.backend())
            .field("config", &self.config)
            .finish()
    }
}

impl SlidingWindowRateLimiter {
    pub fn new(store: Arc<dyn WindowStore>, config: RateLimitConfig) -> Self {
        Self { store, config }
    }

    /// Limiter backed by a process-local store
    pub fn in_memory(config: RateLimitConfig) -> Self {
        Self::new(Arc::new(MemoryWindowStore::new()), config)
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    pub fn global_key() -> String {
        format!("{}global", KEY_PREFIX)
    }

    pub fn caller_key(caller: &str) -> String {
        format!("{}user:{}", KEY_PREFIX, caller)
    }

    /// Check admission for `caller` at the current time
    pub async fn check(&self, caller: &str) -> Result<AdmissionDecision, RateLimitError> {
        self.check_at(caller, Utc::now()).await
    }

    /// Check admission for `caller` as of `now`
    pub async fn check_at(
        &self,
        caller: &str,
        now: DateTime<Utc>,
    ) -> Result<AdmissionDecision, RateLimitError> {
        let window_secs = i64::try_from(self.config.window_secs).unwrap_or(i64::MAX);
        let reset_at = now.timestamp().saturating_add(window_secs);

        if !self.config.enabled {
            return Ok(self.unchecked(reset_at));
        }

        let global = match self
            .check_key(&Self::global_key(), self.config.global_limit, now)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => return self.on_store_error(e, reset_at),
        };
        if !global.admitted {
            warn!(
                "Global rate limit exceeded: {}/{}",
                global.count, self.config.global_limit
            );
            return Ok(AdmissionDecision::Rejected(RateLimitRejection {
                scope: RateLimitScope::Global,
                limit: self.config.global_limit,
                remaining: 0,
                reset_at,
            }));
        }

        let user = match self
            .check_key(&Self::caller_key(caller), self.config.user_limit, now)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => return self.on_store_error(e, reset_at),
        };
        if !user.admitted {
            warn!(
                "Caller rate limit exceeded: {}/{}",
                user.count, self.config.user_limit
            );
            return Ok(AdmissionDecision::Rejected(RateLimitRejection {
                scope: RateLimitScope::Caller,
                limit: self.config.user_limit,
                remaining: 0,
                reset_at,
            }));
        }

        Ok(AdmissionDecision::Admitted(RateLimitInfo {
            limit: self.config.user_limit,
            remaining: remaining_after(self.config.user_limit, user.count),
            reset_at,
        }))
    }

    async fn check_key(
        &self,
        key: &str,
        limit: u32,
        now: DateTime<Utc>,
    ) -> Result<WindowOutcome, RateLimitError> {
        let outcome = self.store.admit(key, limit, self.window(), now).await?;
        debug!(
            "Window {}: {} in window, limit {}, admitted: {}",
            key, outcome.count, limit, outcome.admitted
        );
        Ok(outcome)
    }

    fn on_store_error(
        &self,
        err: RateLimitError,
        reset_at: i64,
    ) -> Result<AdmissionDecision, RateLimitError> {
        error!("Rate limit check failed on {} store: {}", self.backend(), err);
        if self.config.fail_open {
            Ok(self.unchecked(reset_at))
        } else {
            Err(err)
        }
    }

    fn unchecked(&self, reset_at: i64) -> AdmissionDecision {
        AdmissionDecision::Admitted(RateLimitInfo {
            limit: self.config.user_limit,
            remaining: self.config.user_limit,
            reset_at,
        })
    }

    /// Current global usage and number of callers holding a window
    pub async fn stats(&self) -> Result<RateLimitStats, RateLimitError> {
        self.stats_at(Utc::now()).await
    }

    /// Usage as of `now`
    pub async fn stats_at(&self, now: DateTime<Utc>) -> Result<RateLimitStats, RateLimitError> {
        let global = self
            .store
            .count(&Self::global_key(), self.window(), now)
            .await?;
        let active_callers = self
            .store
            .active_keys(&format!("{}user:", KEY_PREFIX), self.window(), now)
            .await?;

        let global_current = u32::try_from(global).unwrap_or(u32::MAX);
        Ok(RateLimitStats {
            backend: self.backend(),
            global_current_requests: global,
            global_limit: self.config.global_limit,
            global_remaining: self.config.global_limit.saturating_sub(global_current),
            active_callers,
            window_size_seconds: self.config.window_secs,
        })
    }

    fn window(&self) -> std::time::Duration {
        self.config.window()
    }
}

/// Slots left after admitting one more request on top of `count`
fn remaining_after(limit: u32, count: u64) -> u32 {
    let used = u32::try_from(count).unwrap_or(u32::MAX).saturating_add(1);
    limit.saturating_sub(used)
}
