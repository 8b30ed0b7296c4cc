//! Mock HTTP server setup for integration tests

use ai_lib_openai::{HttpTransport, Transport};
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::sync::Arc;

pub const API_KEY: &str = "test-key";

/// Test fixture that owns a mock server and a session pointed at it
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Session authenticated with [`API_KEY`] and a fixed organization.
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::new(
            HttpTransport::builder()
                .api_key(API_KEY)
                .organization("org-test")
                .build()
                .expect("build transport"),
        )
    }

    /// Create a mock for a successful JSON response, requiring the body to
    /// contain `partial` and the auth headers to be present.
    pub async fn mock_json_response(
        &mut self,
        path: &str,
        partial: serde_json::Value,
        body: serde_json::Value,
    ) -> Mock {
        self.server
            .mock("POST", path)
            .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
            .match_header("openai-organization", "org-test")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(partial))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    /// Create a mock for an error response
    pub async fn mock_error_response(
        &mut self,
        path: &str,
        status: usize,
        error_body: &str,
    ) -> Mock {
        self.server
            .mock("POST", path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(error_body)
            .create_async()
            .await
    }

    /// Create a mock that must never be hit
    pub async fn mock_unreachable(&mut self, path: &str) -> Mock {
        self.server
            .mock("POST", path)
            .expect(0)
            .with_status(500)
            .create_async()
            .await
    }
}
