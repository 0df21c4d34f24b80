//! User-facing errors for cache commands.

use tracing::debug;

use ghac_api::ApiError;

/// Error reported to the user by `list` and `delete`.
///
/// The display text is the complete message printed on stderr.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Bad flag value or argument, or a deletion that cannot be confirmed.
    #[error("{0}")]
    Validation(String),

    /// The API answered 404.
    #[error("The given repo does not exist.")]
    RepoNotFound {
        /// Underlying API error.
        source: ApiError,
    },

    /// The API rejected the request with another 4xx status.
    #[error("{message}")]
    Client {
        /// Message returned by the server.
        message: String,
        /// Underlying API error.
        source: ApiError,
    },

    /// 5xx, transport failure or undecodable response.
    #[error("We could not process your request due to internal error.")]
    Internal {
        /// Underlying API error.
        source: ApiError,
    },
}

impl CacheError {
    /// Classify an API failure.
    pub fn from_api(err: ApiError) -> Self {
        debug!(error = %err, "cache API request failed");
        if err.is_not_found() {
            return Self::RepoNotFound { source: err };
        }
        if err.is_client_error() {
            let message = err.message().unwrap_or_default().to_string();
            return Self::Client {
                message,
                source: err,
            };
        }
        Self::Internal { source: err }
    }
}

impl From<ApiError> for CacheError {
    fn from(err: ApiError) -> Self {
        Self::from_api(err)
    }
}
