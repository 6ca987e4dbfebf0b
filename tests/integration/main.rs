//! Integration test binary -- all integration tests consolidated into a single
//! binary.

// Allow unwrap/expect in test code
#![allow(clippy::unwrap_used, clippy::expect_used)]


mod pipeline_artifacts;
mod viseme_properties;
