//! Factory for shared command dependencies.
//!
//! Provides lazy initialization of configuration, API clients, git and the
//! prompter. Supports test mode with dependency injection for isolated
//! testing.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use anyhow::Result;
use secrecy::SecretString;
use tracing::debug;

use ghac_api::Client;
use ghac_api::http::{self, HttpClientOptions};
use ghac_core::Repo;
use ghac_core::cmdutil::AuthError;
use ghac_core::config::{Config, FileConfig, MemoryConfig};
use ghac_core::iostreams::{IOStreams, TestOutput};
use ghac_core::prompter::{DialoguerPrompter, Prompter, StubPrompter};
use ghac_git::GitClient;

use crate::cache::errors::CacheError;

/// Message shown when neither `--repo` nor the git remotes name a repository.
pub const NO_REPO_MESSAGE: &str = "could not determine the current repository; use --repo to specify one";

/// Shared factory providing lazily-initialized dependencies to all commands.
pub struct Factory {
    /// Application version.
    pub app_version: String,
    /// I/O streams.
    pub io: IOStreams,
    config: OnceLock<Box<dyn Config>>,

    // Test overrides
    http_override: Option<reqwest::Client>,
    api_url_override: Option<String>,
    token_override: Option<SecretString>,
    prompter_stub: Option<Arc<StubPrompter>>,
    git_dir: Option<PathBuf>,
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("app_version", &self.app_version)
            .field("io", &self.io)
            .finish_non_exhaustive()
    }
}

impl Factory {
    /// Create a factory for the real terminal.
    pub fn new(app_version: impl Into<String>) -> Self {
        let mut io = IOStreams::system();
        if std::env::var_os("GH_PROMPT_DISABLED").is_some() {
            io.set_never_prompt(true);
        }
        Self::with_io(app_version.into(), io, OnceLock::new())
    }

    /// Create a test factory with captured I/O and an empty in-memory config.
    pub fn test() -> (Self, TestOutput) {
        let (io, output) = IOStreams::test_with_output();
        let config: Box<dyn Config> = Box::new(MemoryConfig::new());
        (
            Self::with_io("test".to_string(), io, OnceLock::from(config)),
            output,
        )
    }

    fn with_io(app_version: String, io: IOStreams, config: OnceLock<Box<dyn Config>>) -> Self {
        Self {
            app_version,
            io,
            config,
            http_override: None,
            api_url_override: None,
            token_override: None,
            prompter_stub: None,
            git_dir: None,
        }
    }

    /// Use a custom reqwest client (e.g., one pointed at wiremock).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_override = Some(client);
        self
    }

    /// Send API requests to `url` (with trailing slash) instead of GitHub.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url_override = Some(url.into());
        self
    }

    /// Use a fixed auth token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token_override = Some(SecretString::from(token.into()));
        self
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: Box<dyn Config>) -> Self {
        self.config = OnceLock::from(config);
        self
    }

    /// Install a stub prompter and return it for configuring answers.
    pub fn with_stub_prompter(mut self) -> (Self, Arc<StubPrompter>) {
        let stub = Arc::new(StubPrompter::default());
        self.prompter_stub = Some(stub.clone());
        (self, stub)
    }

    /// Resolve the repository from git remotes in `dir`.
    #[must_use]
    pub fn with_git_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.git_dir = Some(dir.into());
        self
    }

    /// Get the configuration, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be read.
    pub fn config(&self) -> Result<&dyn Config> {
        if self.config.get().is_none() {
            let loaded: Box<dyn Config> = Box::new(FileConfig::load()?);
            // A concurrent caller may have won; either value is fine.
            let _ = self.config.set(loaded);
        }
        self.config
            .get()
            .map(|c| &**c)
            .ok_or_else(|| anyhow::anyhow!("failed to initialize config"))
    }

    /// Create a prompter instance.
    pub fn prompter(&self) -> Arc<dyn Prompter> {
        match self.prompter_stub {
            Some(ref stub) => stub.clone(),
            None => Arc::new(DialoguerPrompter::new()),
        }
    }

    /// Whether interactive prompts may be shown.
    ///
    /// Requires terminals on stdin and stdout, no `GH_PROMPT_DISABLED`, and
    /// `prompt` not set to `disabled` in the config.
    pub fn can_prompt(&self) -> bool {
        self.io.can_prompt() && self.config().is_ok_and(|c| c.prompt_enabled())
    }

    /// Build an API client for `hostname`, tagging requests with `command`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when no token is configured for the host, or an
    /// error if the HTTP client cannot be built.
    pub fn api_client(&self, hostname: &str, command: &str) -> Result<Client> {
        let http = match self.http_override {
            Some(ref client) => client.clone(),
            None => http::build_client(&HttpClientOptions {
                app_version: self.app_version.clone(),
                command: command.to_string(),
                log_verbose: std::env::var_os("GH_DEBUG").is_some(),
            })?,
        };

        let token = match self.token_override {
            Some(ref token) => token.clone(),
            None => {
                let (token, source) = self
                    .config()?
                    .authentication()
                    .active_token(hostname)
                    .ok_or_else(|| {
                        AuthError(format!(
                            "authentication required for {hostname}; run \"gh auth login\" or set GH_TOKEN"
                        ))
                    })?;
                debug!(host = hostname, %source, "using token");
                SecretString::from(token)
            }
        };

        let mut client = Client::new(http, hostname, Some(token));
        if let Some(ref url) = self.api_url_override {
            client = client.with_url_override(url.clone());
        }
        Ok(client)
    }

    /// Repository named by `--repo`, or else the one the local checkout tracks.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Validation`] for a malformed `--repo` value or
    /// when no repository can be determined.
    pub async fn resolve_repo(&self, flag: Option<&str>) -> Result<Repo, CacheError> {
        if let Some(nwo) = flag.filter(|v| !v.is_empty()) {
            return Repo::from_full_name(nwo).map_err(|e| CacheError::Validation(e.to_string()));
        }

        let git = GitClient::new().map(|client| match self.git_dir {
            Some(ref dir) => client.with_repo_dir(dir),
            None => client,
        });
        let resolved = match git {
            Ok(client) => client.base_repo().await,
            Err(e) => Err(e),
        };
        resolved.map_err(|e| {
            debug!(error = %e, "repository resolution from git failed");
            CacheError::Validation(NO_REPO_MESSAGE.to_string())
        })
    }
}
