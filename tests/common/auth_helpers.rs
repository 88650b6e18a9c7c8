//! Authentication test helpers
//!
//! Tokens are signed with a fixed test secret that matches the one used by
//! `test_config`.

use blockdoc::backend::auth::TokenVerifier;
use blockdoc::shared::SubjectId;

/// Secret shared by every test server
pub const TEST_JWT_SECRET: &str = "blockdoc-test-secret";

/// A subject with a valid bearer token
pub struct TestUser {
    pub subject: SubjectId,
    pub token: String,
}

/// Issue a token for `subject` with the test secret
pub fn create_test_token(subject: &str) -> String {
    TokenVerifier::new(TEST_JWT_SECRET)
        .issue(&SubjectId::new(subject))
        .expect("Failed to create test token")
}

/// Create a named test user
pub fn create_test_user(subject: &str) -> TestUser {
    TestUser {
        subject: SubjectId::new(subject),
        token: create_test_token(subject),
    }
}
