//! # dispatch-gateway
//!
//! An AI model gateway: callers send OpenAI-format requests, the gateway picks
//! a healthy backend that serves the requested model and forwards the call.
//!
//! - **Provider registry** with per-provider metrics (request/error counts,
//!   EMA latency, health status)
//! - **Load balancing**: round robin, random, least requests, weighted
//! - **Retry and failover** across providers with a fixed delay
//! - **Background health probing** that heals and demotes providers
//! - **Sliding-window admission control** with a global and a per-caller
//!   ceiling, shared through Redis across instances
//!
//! ## Embedding the dispatcher
//!
//! ```rust,no_run
//! use dispatch_gateway::core::router::{ManagerConfig, ProviderManager};
//! use dispatch_gateway::core::providers::OpenAICompatibleProvider;
//! use dispatch_gateway::config::ProviderConfig;
//! use dispatch_gateway::core::types::{ChatMessage, ChatRequest, ModelDescriptor};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = Arc::new(ProviderManager::new(ManagerConfig::default()));
//!     let provider = OpenAICompatibleProvider::new(&ProviderConfig {
//!         name: "openai".to_string(),
//!         base_url: "https://api.openai.com/v1".to_string(),
//!         api_key: std::env::var("OPENAI_API_KEY")?,
//!         models: vec![ModelDescriptor::new("gpt-4o-mini", 128_000)],
//!         ..Default::default()
//!     })?;
//!     manager.register_provider(Arc::new(provider));
//!
//!     let request = ChatRequest::new("gpt-4o-mini", vec![ChatMessage::user("Hello")]);
//!     let response = manager.dispatch(request).await?;
//!     println!("{:?}", response.first_content());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use core::providers::{OpenAICompatibleProvider, ProviderError};
pub use core::rate_limiter::SlidingWindowRateLimiter;
pub use core::router::{LoadBalanceStrategy, ProviderManager, RouterError};
pub use core::traits::Provider;
pub use utils::error::{GatewayError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
