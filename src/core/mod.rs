//! Core functionality for the Gateway
//!
//! - `types` - Request, response and stream types
//! - `traits` - The provider contract
//! - `providers` - Provider adapters and their error type
//! - `router` - Registry, load balancing and dispatch with retry
//! - `health` - Background provider probing
//! - `rate_limiter` - Sliding-window admission control

pub mod health;
pub mod providers;
pub mod rate_limiter;
pub mod router;
pub mod traits;
pub mod types;
