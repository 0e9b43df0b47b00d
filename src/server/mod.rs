//! HTTP server implementation
//!
//! This module provides the HTTP server and routing functionality.

pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{HttpServer, build_limiter, build_manager, create_app};
pub use state::AppState;
