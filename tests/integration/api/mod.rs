//! API integration tests
//!
//! Integration tests for all API endpoints

mod blocks_test;
mod documents_test;
