//! Git-related error types.

/// Errors from git operations.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// Git command failed with an exit code.
    #[error("git {command} failed: {message}")]
    CommandFailed {
        /// The git subcommand that failed.
        command: String,
        /// Error message from stderr.
        message: String,
        /// Process exit code, if available.
        exit_code: Option<i32>,
    },

    /// Git binary not found.
    #[error("git executable not found in PATH")]
    NotFound,

    /// No remote points at a recognizable repository.
    #[error("none of the git remotes point to a known GitHub host")]
    NoResolvableRemote,

    /// I/O error from subprocess.
    #[error("git IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GitError {
    /// Get the exit code if this was a command failure.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_display_command_failed() {
        let err = GitError::CommandFailed {
            command: "remote".to_string(),
            message: "not a git repository".to_string(),
            exit_code: Some(128),
        };
        assert_eq!(err.to_string(), "git remote failed: not a git repository");
        assert_eq!(err.exit_code(), Some(128));
    }

    #[test]
    fn test_should_return_no_exit_code_for_other_errors() {
        assert!(GitError::NotFound.exit_code().is_none());
        assert!(GitError::NoResolvableRemote.exit_code().is_none());
    }

    #[test]
    fn test_should_convert_io_error() {
        let git_err: GitError = std::io::Error::other("spawn failed").into();
        assert!(matches!(git_err, GitError::Io(_)));
        assert!(git_err.to_string().contains("spawn failed"));
    }
}
