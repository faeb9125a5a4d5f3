//! Test context returned by [`TestBuilder`](crate::TestBuilder).
//!
//! The context owns an in-memory SQLite database, a session backed by a memory store and a
//! mock document server that builder jobs & file downloads are sent to.

use std::sync::Arc;

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tower_sessions::{MemoryStore, Session};

use crate::error::TestError;

/// Running test environment
///
/// ```ignore
/// let mut test = TestBuilder::new().with_docfill_tables().build().await?;
///
/// let user = test.user().insert_user(false).await?;
/// test.doc_server().create_builder_endpoint(json!({"key": "k", "urls": {}}), 1);
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Connection to the in-memory SQLite database
    pub db: DatabaseConnection,
    /// Session used for authenticated requests
    pub session: Session,

    /// Mock document server
    pub server: ServerGuard,
    /// Mock endpoints checked by [`TestContext::assert_mocks`]
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;

        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            session,
            server,
            mocks: Vec::new(),
        })
    }

    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Base URL of the mock document server, ending with `/`
    pub fn doc_server_url(&self) -> String {
        format!("{}/", self.server.url())
    }

    /// Keeps a mock alive until the end of the test and checks it in [`TestContext::assert_mocks`]
    pub fn add_mock(&mut self, mock: Mock) {
        self.mocks.push(mock);
    }

    /// Asserts every mock endpoint was called the expected number of times
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
