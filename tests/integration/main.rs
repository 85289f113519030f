//! Integration tests for the spider
//!
//! These tests use wiremock to stand up mock HTTP servers and drive full
//! crawl runs end-to-end.

mod crawl_tests;
