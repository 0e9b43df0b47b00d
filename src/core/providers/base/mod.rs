//! Shared building blocks for HTTP provider adapters

pub mod sse;

pub use sse::{SseDecoder, SseFrame};
