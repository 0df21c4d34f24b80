//! Shared test utilities for command testing.
//!
//! Provides a factory wired to a wiremock server plus JSON builders for
//! cache API payloads.

use std::sync::Arc;

use ghac_core::config::MemoryConfig;
use ghac_core::iostreams::TestOutput;
use ghac_core::prompter::StubPrompter;
use serde_json::{Value, json};
use wiremock::MockServer;

use crate::factory::Factory;

/// Token every harness request is authenticated with.
pub const TEST_TOKEN: &str = "ghp_test_token_123";

/// A fully-configured test harness with factory, output capture, and mock server.
#[derive(Debug)]
pub struct TestHarness {
    /// The factory configured for testing.
    pub factory: Factory,
    /// Captured stdout/stderr output.
    pub output: TestOutput,
    /// Wiremock mock server for API requests.
    pub server: MockServer,
    /// Stub prompter for providing test answers.
    pub prompter: Arc<StubPrompter>,
}

impl TestHarness {
    /// Create a non-interactive harness routing API requests to a mock server.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let (factory, output) = Factory::test();
        let (factory, prompter) = factory.with_stub_prompter();
        let factory = factory
            .with_http_client(reqwest::Client::new())
            .with_api_url(format!("{}/", server.uri()))
            .with_token(TEST_TOKEN)
            .with_config(Box::new(
                MemoryConfig::new().with_host("github.com", "testuser", TEST_TOKEN),
            ));

        Self {
            factory,
            output,
            server,
            prompter,
        }
    }

    /// Create a harness whose terminal accepts prompts.
    pub async fn interactive() -> Self {
        let mut harness = Self::new().await;
        harness.factory.io.set_stdin_tty(true);
        harness.factory.io.set_stdout_tty(true);
        harness.factory.io.set_never_prompt(false);
        harness.factory.io.set_terminal_width(200);
        harness
    }

    /// Get captured stdout as a string.
    pub fn stdout(&self) -> String {
        self.output.stdout()
    }

    /// Get captured stderr as a string.
    pub fn stderr(&self) -> String {
        self.output.stderr()
    }
}

// --- JSON builders ---

/// A cache entry as returned by the REST API.
pub fn cache_json(id: u64, key: &str, git_ref: &str) -> Value {
    json!({
        "id": id,
        "ref": git_ref,
        "key": key,
        "version": format!("version-{id}"),
        "last_accessed_at": "2022-06-29T13:33:49Z",
        "created_at": "2022-06-29T13:33:49Z",
        "size_in_bytes": 1024
    })
}

/// A list (or delete) response body.
pub fn list_json(total_count: u64, entries: &[Value]) -> Value {
    json!({
        "total_count": total_count,
        "actions_caches": entries
    })
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_should_send_harness_token() {
        let h = TestHarness::new().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/app/actions/cache/usage"))
            .and(header("Authorization", "token ghp_test_token_123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "full_name": "octo/app",
                "active_caches_size_in_bytes": 0,
                "active_caches_count": 0
            })))
            .expect(1)
            .mount(&h.server)
            .await;

        let client = h.factory.api_client("github.com", "list").unwrap();
        let usage: Value = client
            .rest(reqwest::Method::GET, "repos/octo/app/actions/cache/usage")
            .await
            .unwrap();
        assert_eq!(usage["full_name"], "octo/app");
        assert!(h.stderr().is_empty());
    }
}
