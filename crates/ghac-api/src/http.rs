//! HTTP client construction.
//!
//! Provides the default headers (User-Agent, Accept) every request carries.

use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::debug;

/// Product name sent in the User-Agent header.
pub const USER_AGENT_PRODUCT: &str = "gh-actions-cache";

/// Options for constructing an HTTP client.
#[derive(Debug, Clone)]
pub struct HttpClientOptions {
    /// Application version for User-Agent.
    pub app_version: String,
    /// Subcommand being run, appended to the User-Agent.
    pub command: String,
    /// Log every request at debug level.
    pub log_verbose: bool,
}

/// User-Agent value in the `gh-actions-cache/{version}/{command}` form.
pub fn user_agent(app_version: &str, command: &str) -> String {
    format!("{USER_AGENT_PRODUCT}/{app_version}/{command}")
}

/// Build a reqwest client with default configuration.
///
/// # Errors
///
/// Returns an error if the headers are invalid or the client cannot be constructed.
pub fn build_client(opts: &HttpClientOptions) -> anyhow::Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_str(&user_agent(&opts.app_version, &opts.command))?,
    );
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );

    if opts.log_verbose {
        debug!(command = %opts.command, "building HTTP client with verbose logging");
    }

    Ok(reqwest::Client::builder()
        .default_headers(headers)
        .build()?)
}
