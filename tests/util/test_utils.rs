//! Test utilities for creating AppState pointing at the mock document server

use docfill::server::{config::Config, model::app::AppState};
use docfill_test_utils::{
    constant::{TEST_APP_URL, TEST_INTERNAL_JWT_SECRET},
    TestContext,
};

/// Extension trait for TestContext to create AppState sharing its database
pub trait TestContextExt {
    fn config(&self) -> Config;
    fn into_app_state(&self) -> AppState;
}

impl TestContextExt for TestContext {
    fn config(&self) -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            app_url: TEST_APP_URL.to_string(),
            doc_server_url: self.doc_server_url(),
            doc_server_jwt_secret: None,
            doc_server_jwt_header: "Authorization".to_string(),
            internal_jwt_secret: TEST_INTERNAL_JWT_SECRET.to_string(),
            security_token_ttl: None,
            builder_timeout: 5,
            bind_address: "127.0.0.1:0".to_string(),
        }
    }

    fn into_app_state(&self) -> AppState {
        AppState::new(self.db.clone(), reqwest::Client::new(), self.config())
    }
}
