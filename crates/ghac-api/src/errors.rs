//! API error types.

/// Failure talking to the GitHub REST API.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Non-success HTTP response.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// The `message` field of the error body, or the raw body.
        message: String,
    },

    /// Network/transport error.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("failed to parse API response: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status code, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::JsonParse(_) => None,
        }
    }

    /// Check if this is a 404 Not Found error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this is a 4xx error.
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Message returned by the server for an HTTP error.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn http_error(status: u16, message: &str) -> ApiError {
        ApiError::Http {
            status,
            message: message.to_string(),
        }
    }

    #[rstest]
    #[case(404, true, true)]
    #[case(403, false, true)]
    #[case(422, false, true)]
    #[case(500, false, false)]
    #[case(503, false, false)]
    fn test_should_classify_http_status(
        #[case] status: u16,
        #[case] not_found: bool,
        #[case] client_error: bool,
    ) {
        let err = http_error(status, "boom");
        assert_eq!(err.is_not_found(), not_found);
        assert_eq!(err.is_client_error(), client_error);
    }

    #[test]
    fn test_should_display_http_error() {
        let err = http_error(403, "Resource not accessible by integration");
        assert_eq!(
            err.to_string(),
            "HTTP 403: Resource not accessible by integration"
        );
        assert_eq!(err.message(), Some("Resource not accessible by integration"));
    }

    #[test]
    fn test_should_not_classify_parse_errors_as_http() {
        let err: ApiError = serde_json::from_str::<u64>("nope").unwrap_err().into();
        assert_eq!(err.status(), None);
        assert!(!err.is_client_error());
        assert!(err.message().is_none());
        assert!(err.to_string().starts_with("failed to parse API response"));
    }
}
