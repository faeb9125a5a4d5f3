use mockito::{Matcher, Mock};

use crate::TestContext;

impl TestContext {
    pub fn doc_server<'a>(&'a mut self) -> DocServerFixtures<'a> {
        DocServerFixtures { test: self }
    }
}

/// Mock endpoints of the document server
pub struct DocServerFixtures<'a> {
    test: &'a mut TestContext,
}

impl<'a> DocServerFixtures<'a> {
    /// Creates a `POST /docbuilder` endpoint answering with the provided body
    pub fn create_builder_endpoint(&mut self, response: serde_json::Value, expected: usize) -> Mock {
        self.test
            .server
            .mock("POST", "/docbuilder")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response.to_string())
            .expect(expected)
            .create()
    }

    /// Creates a `POST /docbuilder` endpoint which requires the configured header to be present
    pub fn create_signed_builder_endpoint(
        &mut self,
        header: &str,
        response: serde_json::Value,
        expected: usize,
    ) -> Mock {
        self.test
            .server
            .mock("POST", "/docbuilder")
            .match_header(header, Matcher::Regex("^Bearer .+".to_string()))
            .match_body(Matcher::Regex("\"token\"".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response.to_string())
            .expect(expected)
            .create()
    }

    /// Creates a `GET` endpoint serving a generated file
    pub fn create_file_endpoint(&mut self, path: &str, body: &[u8], expected: usize) -> Mock {
        self.test
            .server
            .mock("GET", path)
            .with_status(200)
            .with_body(body)
            .expect(expected)
            .create()
    }

    /// URL of a path on the mock document server
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.test.server.url(), path)
    }
}
