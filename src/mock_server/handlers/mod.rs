//! HTTP request handlers for the mock server.

pub mod purchases;

pub use purchases::*;
