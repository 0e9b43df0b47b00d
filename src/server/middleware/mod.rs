//! HTTP middleware

pub mod rate_limit;

pub use rate_limit::{
    LIMIT_HEADER, REMAINING_HEADER, RESET_HEADER, RateLimitMiddleware, caller_identity,
};
