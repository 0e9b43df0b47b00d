//! Sorted-set sliding windows
//!
//! Each window is a sorted set of request entries scored by their timestamp in
//! microseconds. Admission runs as a single Lua script so the prune, count and
//! insert happen atomically on the server.

use super::pool::RedisPool;
use crate::utils::error::{GatewayError, Result};
use redis::Script;
use std::sync::LazyLock;
use std::time::Duration;

const SLIDING_WINDOW_ADMIT: &str = r#"
local key = KEYS[1]
local now = tonumber(ARGV[1])
local window = tonumber(ARGV[2])
local limit = tonumber(ARGV[3])
local member = ARGV[4]
local ttl = tonumber(ARGV[5])

redis.call('ZREMRANGEBYSCORE', key, '-inf', now - window)
local count = redis.call('ZCARD', key)
if count < limit then
    redis.call('ZADD', key, now, member)
    redis.call('EXPIRE', key, ttl)
    return {1, count}
end
return {0, count}
"#;

static ADMIT_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(SLIDING_WINDOW_ADMIT));

/// Key expiry: twice the window, at least one second
fn key_ttl_secs(window: Duration) -> u64 {
    (window.as_secs() * 2).max(1)
}

fn micros(window: Duration) -> i64 {
    i64::try_from(window.as_micros()).unwrap_or(i64::MAX)
}

impl RedisPool {
    /// Atomically prune, count and conditionally add an entry.
    ///
    /// Returns whether the entry was added and the count before it.
    pub async fn sliding_window_admit(
        &self,
        key: &str,
        limit: u32,
        window: Duration,
        now_micros: i64,
    ) -> Result<(bool, u64)> {
        let member = format!("{}-{}", now_micros, uuid::Uuid::new_v4());
        let mut invocation = ADMIT_SCRIPT.prepare_invoke();
        invocation
            .key(key)
            .arg(now_micros)
            .arg(micros(window))
            .arg(limit)
            .arg(member)
            .arg(key_ttl_secs(window));
        let mut conn = self.connection();
        let reply: Vec<i64> = self
            .bounded("EVALSHA", invocation.invoke_async(&mut conn))
            .await?;

        match reply.as_slice() {
            [admitted, count] => Ok((*admitted == 1, u64::try_from(*count).unwrap_or(0))),
            other => Err(GatewayError::Internal(format!(
                "Unexpected sliding window reply: {:?}",
                other
            ))),
        }
    }

    /// Entries newer than `now - window`
    pub async fn sliding_window_count(
        &self,
        key: &str,
        window: Duration,
        now_micros: i64,
    ) -> Result<u64> {
        let cutoff = now_micros.saturating_sub(micros(window));
        let mut conn = self.connection();
        let mut cmd = redis::cmd("ZCOUNT");
        cmd.arg(key).arg(format!("({}", cutoff)).arg("+inf");
        self.bounded("ZCOUNT", cmd.query_async(&mut conn)).await
    }

    /// Count keys matching `pattern` with incremental SCAN
    pub async fn count_keys(&self, pattern: &str) -> Result<usize> {
        let mut conn = self.connection();
        let mut cursor: u64 = 0;
        let mut total = 0;
        loop {
            let mut cmd = redis::cmd("SCAN");
            cmd.arg(cursor).arg("MATCH").arg(pattern).arg("COUNT").arg(100);
            let (next, keys): (u64, Vec<String>) =
                self.bounded("SCAN", cmd.query_async(&mut conn)).await?;
            total += keys.len();
            if next == 0 {
                return Ok(total);
            }
            cursor = next;
        }
    }
}
