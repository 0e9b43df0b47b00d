//! Redis storage implementation
//!
//! ## Module Structure
//!
//! - `pool` - Shared connection and health checks
//! - `window` - Sorted-set sliding windows for admission control
//! - `tests` - Module tests

mod pool;
mod window;

pub use pool::RedisPool;
