//! Integration tests
//!
//! Sample-mode runs are exercised end to end through the filesystem; live
//! mode is exercised against wiremock servers.

mod live_client_tests;
mod pipeline_tests;
