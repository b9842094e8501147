//! Service tests for dispatcher adapters
//!
//! Each adapter is exercised against a wiremock upstream.

pub mod messages;
pub mod summary;
