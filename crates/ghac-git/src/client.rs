//! Thin wrapper around the `git` executable.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, instrument};

use ghac_core::Repo;

use crate::errors::GitError;
use crate::remote::{Remote, resolve_base_repo};

/// Client for executing git commands.
#[derive(Debug, Clone)]
pub struct GitClient {
    git_path: PathBuf,
    repo_dir: Option<PathBuf>,
}

impl GitClient {
    /// Create a new git client using the system git.
    ///
    /// # Errors
    ///
    /// Returns an error if git is not found in PATH.
    pub fn new() -> Result<Self, GitError> {
        let git_path = which::which("git").map_err(|_| GitError::NotFound)?;
        Ok(Self {
            git_path,
            repo_dir: None,
        })
    }

    /// Run commands in `dir` instead of the current directory.
    #[must_use]
    pub fn with_repo_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.repo_dir = Some(dir.into());
        self
    }

    /// Execute a git command and return trimmed stdout.
    #[instrument(skip(self), fields(args = ?args))]
    async fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let mut cmd = Command::new(&self.git_path);
        cmd.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());
        if let Some(ref dir) = self.repo_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await?;
        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: args.first().copied().unwrap_or_default().to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                exit_code: output.status.code(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// List remotes in priority order with their `gh-resolved` markers.
    ///
    /// # Errors
    ///
    /// Returns an error if git fails, e.g. outside a repository.
    pub async fn remotes(&self) -> Result<Vec<Remote>, GitError> {
        let output = self.run(&["remote", "-v"]).await?;
        let mut remotes = Remote::parse_remotes(&output);

        match self
            .run(&["config", "--get-regexp", r"^remote\..*\.gh-resolved$"])
            .await
        {
            Ok(config) => Remote::apply_resolved(&mut remotes, &config),
            // Exit code 1 means no key matched.
            Err(e) if e.exit_code() == Some(1) => {}
            Err(e) => return Err(e),
        }
        Ok(remotes)
    }

    /// Repository the current checkout belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if git fails or no remote points at a repository.
    pub async fn base_repo(&self) -> Result<Repo, GitError> {
        let remotes = self.remotes().await?;
        let repo = resolve_base_repo(&remotes)
            .cloned()
            .ok_or(GitError::NoResolvableRemote)?;
        debug!(%repo, "resolved base repository from git remotes");
        Ok(repo)
    }
}
