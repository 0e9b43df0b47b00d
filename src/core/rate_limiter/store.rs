//! Sliding-window stores

use super::types::{RateLimitError, WindowOutcome};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

/// Backend holding one timestamp set per key
///
/// `admit` must prune, count and conditionally insert as one atomic step:
/// two concurrent callers can never both take the last slot.
#[async_trait]
pub trait WindowStore: Send + Sync {
    /// Prune entries at or before `now - window`, then add one for `now` if
    /// fewer than `limit` remain
    async fn admit(
        &self,
        key: &str,
        limit: u32,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Result<WindowOutcome, RateLimitError>;

    /// Entries newer than `now - window`
    async fn count(
        &self,
        key: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Result<u64, RateLimitError>;

    /// Number of keys starting with `prefix` that still hold an entry newer
    /// than `now - window`
    async fn active_keys(
        &self,
        prefix: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Result<usize, RateLimitError>;

    /// Backend name for logs and stats
    fn backend(&self) -> &'static str;
}

pub(crate) fn window_micros(window: Duration) -> i64 {
    i64::try_from(window.as_micros()).unwrap_or(i64::MAX)
}

/// Process-local store used when Redis is disabled
///
/// Keys whose newest entry has left the window are swept at most once per
/// window, so a caller that stops sending releases its key.
#[derive(Debug, Default)]
pub struct MemoryWindowStore {
    windows: Mutex<MemoryWindows>,
}

#[derive(Debug, Default)]
struct MemoryWindows {
    entries: HashMap<String, VecDeque<i64>>,
    last_sweep: i64,
}

impl MemoryWindows {
    fn sweep(&mut self, cutoff: i64, now: i64) {
        self.entries
            .retain(|_, entries| entries.back().is_some_and(|&t| t > cutoff));
        self.last_sweep = now;
    }
}

impl MemoryWindowStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WindowStore for MemoryWindowStore {
    async fn admit(
        &self,
        key: &str,
        limit: u32,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Result<WindowOutcome, RateLimitError> {
        let now = now.timestamp_micros();
        let cutoff = now.saturating_sub(window_micros(window));

        let mut windows = self.windows.lock();
        if now.saturating_sub(windows.last_sweep) >= window_micros(window) {
            windows.sweep(cutoff, now);
        }

        let entries = windows.entries.entry(key.to_string()).or_default();
        while entries.front().is_some_and(|&t| t <= cutoff) {
            entries.pop_front();
        }

        let count = entries.len() as u64;
        let admitted = count < u64::from(limit);
        if admitted {
            entries.push_back(now);
        } else if entries.is_empty() {
            windows.entries.remove(key);
        }
        Ok(WindowOutcome { admitted, count })
    }

    async fn count(
        &self,
        key: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Result<u64, RateLimitError> {
        let cutoff = now
            .timestamp_micros()
            .saturating_sub(window_micros(window));
        let windows = self.windows.lock();
        Ok(windows
            .entries
            .get(key)
            .map(|entries| entries.iter().filter(|&&t| t > cutoff).count() as u64)
            .unwrap_or(0))
    }

    async fn active_keys(
        &self,
        prefix: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Result<usize, RateLimitError> {
        let now = now.timestamp_micros();
        let mut windows = self.windows.lock();
        windows.sweep(now.saturating_sub(window_micros(window)), now);
        Ok(windows
            .entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .count())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
