//! Core type definition module
//!
//! Request, response, streaming and model catalog types shared by providers,
//! the dispatcher and the HTTP surface.

pub mod chat;
pub mod embedding;
pub mod model;
pub mod streaming;

pub use chat::*;
pub use embedding::*;
pub use model::*;
pub use streaming::*;
