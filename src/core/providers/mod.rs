//! Provider adapters
//!
//! - `unified_provider` - The error type every adapter call returns
//! - `base` - Shared SSE decoding
//! - `openai_compatible` - HTTP adapter for OpenAI-format backends

pub mod base;
pub mod openai_compatible;
pub mod unified_provider;

pub use openai_compatible::OpenAICompatibleProvider;
pub use unified_provider::ProviderError;
