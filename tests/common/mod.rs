//! Common test utilities for newsfeed integration tests


#[allow(unused_imports)]
pub use fixtures::*;
