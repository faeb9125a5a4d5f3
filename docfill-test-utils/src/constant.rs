//! Configuration values shared by every test.
//!
//! None of these are real credentials.

/// Secret used to sign security tokens during tests
pub static TEST_INTERNAL_JWT_SECRET: &str = "internal_jwt_secret";

/// Secret shared with the mock document server during tests
pub static TEST_DOC_SERVER_JWT_SECRET: &str = "doc_server_jwt_secret";

/// Base URL the mock document server calls back to
pub static TEST_APP_URL: &str = "http://localhost:8080/";

/// Locale of users created by fixtures
pub static TEST_USER_LANG: &str = "en_US";
