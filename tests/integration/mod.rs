//! Integration test suite for shiftcare-client
//!
//! End-to-end scenarios that exercise the full path a screen takes: load a
//! client configuration, build a retry executor from it, run a mock backend
//! operation, and assert on the attempts made, the delays incurred, and the
//! error that finally surfaces. Timing runs under Tokio's paused clock.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
