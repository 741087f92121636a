//! Integration tests for SEO Scout
//!
//! These tests use wiremock to stand in for the crawl/report backend and
//! drive the real HTTP client and session controller against it.

mod api_tests;
mod session_tests;
