//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `config_validators`: Gateway, server, provider, logging, rate limit and Redis validators
//! - `router_validators`: Router, retry and health check validators
//! - `tests`: Test suite for all validators

mod config_validators;
mod router_validators;
mod trait_def;

pub use trait_def::Validate;
