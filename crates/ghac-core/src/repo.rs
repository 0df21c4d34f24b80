//! Repository references.

use std::fmt;

use crate::instance::{self, GITHUB_COM};

/// A GitHub repository identified by owner, name, and host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repo {
    owner: String,
    name: String,
    host: String,
}

impl Repo {
    /// Create a new repo on github.com.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            host: GITHUB_COM.to_string(),
        }
    }

    /// Create a new repo with a specific host.
    pub fn with_host(
        owner: impl Into<String>,
        name: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            host: instance::normalize_hostname(&host.into()),
        }
    }

    /// Parse `OWNER/REPO` or `HOST/OWNER/REPO`.
    ///
    /// Two-part names are placed on [`instance::default_host`].
    ///
    /// # Errors
    ///
    /// Returns an error unless the input has exactly two or three non-empty parts.
    pub fn from_full_name(nwo: &str) -> Result<Self, RepoParseError> {
        Self::parse_with_default_host(nwo, &instance::default_host())
    }

    /// Parse `OWNER/REPO` or `HOST/OWNER/REPO`, using `default_host` for the
    /// two-part form.
    ///
    /// # Errors
    ///
    /// Returns an error unless the input has exactly two or three non-empty parts.
    pub fn parse_with_default_host(nwo: &str, default_host: &str) -> Result<Self, RepoParseError> {
        let invalid = || RepoParseError::InvalidFormat(nwo.to_string());
        let parts: Vec<&str> = nwo.split('/').collect();
        if parts.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid());
        }
        match parts.as_slice() {
            [owner, name] => Ok(Self::with_host(*owner, *name, default_host)),
            [host, owner, name] => Ok(Self::with_host(*owner, *name, *host)),
            _ => Err(invalid()),
        }
    }

    /// Repository owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// GitHub hostname.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Full name as "OWNER/REPO".
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if instance::is_github_com(&self.host) {
            write!(f, "{}/{}", self.owner, self.name)
        } else {
            write!(f, "{}/{}/{}", self.host, self.owner, self.name)
        }
    }
}

/// Errors from parsing repository references.
#[derive(Debug, thiserror::Error)]
pub enum RepoParseError {
    /// String does not match the expected format.
    #[error("expected the \"[HOST/]OWNER/REPO\" format, got \"{0}\"")]
    InvalidFormat(String),
}
