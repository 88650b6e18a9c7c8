//! SQLite store integration tests
