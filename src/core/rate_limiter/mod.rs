//! Sliding-window admission control
//!
//! A global ceiling and a per-caller ceiling, each enforced over a moving
//! window kept in a [`WindowStore`]. Redis makes the windows shared across
//! gateway instances; the in-memory store covers single-process deployments.

mod limiter;
#[cfg(feature = "redis")]
mod redis_store;
mod store;
mod types;

pub use limiter::{KEY_PREFIX, SlidingWindowRateLimiter};
#[cfg(feature = "redis")]
pub use redis_store::RedisWindowStore;
pub use store::{MemoryWindowStore, WindowStore};
pub use types::{
    AdmissionDecision, RateLimitError, RateLimitInfo, RateLimitRejection, RateLimitScope,
    RateLimitStats, WindowOutcome,
};
