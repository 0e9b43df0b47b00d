//! Common test utilities for dispatch-gateway
//!
//! - Stub providers whose outcomes are scripted per call
//! - Request and configuration fixtures

pub mod fixtures;

pub use fixtures::{ChatRequestFactory, ConfigFactory};
pub use providers::StubProvider;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
