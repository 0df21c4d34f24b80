//! Authenticated GitHub REST client.

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::ApiError;
use ghac_core::instance;

/// GitHub API client wrapping reqwest with auth and error handling.
///
/// Tokens are stored as [`SecretString`] so they never show up in `Debug`
/// output or logs.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    hostname: String,
    token: Option<SecretString>,
    /// Base URL used instead of the host's API URL (e.g. a local mock server).
    api_url_override: Option<String>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("hostname", &self.hostname)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("api_url_override", &self.api_url_override)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new API client for a specific hostname.
    pub fn new(http: reqwest::Client, hostname: &str, token: Option<SecretString>) -> Self {
        Self {
            http,
            hostname: instance::normalize_hostname(hostname),
            token,
            api_url_override: None,
        }
    }

    /// Route every request to `url` instead of the host's API.
    ///
    /// The URL should end with a slash, e.g. `"http://127.0.0.1:8080/"`.
    #[must_use]
    pub fn with_url_override(mut self, url: impl Into<String>) -> Self {
        self.api_url_override = Some(url.into());
        self
    }

    /// Get the hostname this client is configured for.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Execute a REST API request and decode the JSON response.
    ///
    /// `path` is relative to the API root unless it is an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status, or an
    /// undecodable body.
    pub async fn rest<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<T, ApiError> {
        let url = self.resolve_rest_url(path);
        debug!(%method, %url, "REST request");

        let mut req = self.http.request(method, &url);
        if let Some(ref token) = self.token {
            req = req.header("Authorization", format!("token {}", token.expose_secret()));
        }
        let resp = check_response(req.send().await?).await?;
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn resolve_rest_url(&self, path: &str) -> String {
        if path.starts_with("https://") || path.starts_with("http://") {
            return path.to_string();
        }
        let base = match self.api_url_override {
            Some(ref url) => url.clone(),
            None => instance::rest_url(&self.hostname),
        };
        format!("{base}{}", path.trim_start_matches('/'))
    }
}

/// Turn a non-success response into [`ApiError::Http`].
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), body = %text, "REST request failed");
    Err(ApiError::Http {
        status: status.as_u16(),
        message: error_message(&text),
    })
}

/// The `message` field of a GitHub error body, or the body itself.
fn error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => body.trim().to_string(),
    }
}


#[cfg(test)]
mod wiremock_tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn setup_client(server: &MockServer) -> Client {
        Client::new(reqwest::Client::new(), "github.com", Some("test-token".into()))
            .with_url_override(format!("{}/", server.uri()))
    }

    #[tokio::test]
    async fn test_should_send_auth_header_and_decode_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/app/actions/cache/usage"))
            .and(header("Authorization", "token test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"full_name": "octo/app"})))
            .expect(1)
            .mount(&server)
            .await;

        let result: Value = setup_client(&server)
            .rest(reqwest::Method::GET, "repos/octo/app/actions/cache/usage")
            .await
            .unwrap();

        assert_eq!(result["full_name"], "octo/app");
    }

    #[tokio::test]
    async fn test_should_omit_auth_header_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = Client::new(reqwest::Client::new(), "github.com", None)
            .with_url_override(format!("{}/", server.uri()));
        let _: Value = client.rest(reqwest::Method::GET, "ping").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_should_surface_json_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/repos/octo/app/actions/caches"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(json!({"message": "Must have admin rights to Repository."})),
            )
            .mount(&server)
            .await;

        let err = setup_client(&server)
            .rest::<Value>(reqwest::Method::DELETE, "repos/octo/app/actions/caches?key=k")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(403));
        assert_eq!(err.message(), Some("Must have admin rights to Repository."));
    }

    #[tokio::test]
    async fn test_should_report_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
            .mount(&server)
            .await;

        let err = setup_client(&server)
            .rest::<Value>(reqwest::Method::GET, "repos/missing/repo/actions/caches")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_should_fail_on_undecodable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = setup_client(&server)
            .rest::<Value>(reqwest::Method::GET, "anything")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::JsonParse(_)));
    }
}
