//! Storage layer for the Gateway
//!
//! Redis backs the distributed admission windows.

/// Redis connection and sliding-window operations
#[cfg(feature = "redis")]
pub mod redis;
