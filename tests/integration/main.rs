//! Integration tests for Linkrank
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl, rank and persistence cycle end-to-end.

mod common;
mod crawl_tests;
mod persistence_tests;
