//! Core traits module
//!
//! Contains the abstract interfaces the dispatcher is written against

pub mod provider;

pub use provider::{Provider, ProviderSettings};
