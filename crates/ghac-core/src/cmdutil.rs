//! Marker errors that commands return to select a process exit code.

/// The user declined or interrupted an interactive prompt (exit 2).
#[derive(Debug, thiserror::Error)]
#[error("user cancelled")]
pub struct CancelError;

/// No usable credentials were found (exit 4).
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct AuthError(pub String);

/// Check if an error represents a user cancellation.
pub fn is_user_cancellation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<CancelError>().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_display_cancel_error() {
        assert_eq!(CancelError.to_string(), "user cancelled");
    }

    #[test]
    fn test_should_display_auth_error() {
        let err = AuthError("authentication required for github.com".to_string());
        assert_eq!(err.to_string(), "authentication required for github.com");
    }

    #[test]
    fn test_should_detect_user_cancellation() {
        let err: anyhow::Error = CancelError.into();
        assert!(is_user_cancellation(&err));
    }

    #[test]
    fn test_should_detect_cancellation_through_context() {
        let err = anyhow::Error::from(CancelError).context("confirming deletion");
        assert!(is_user_cancellation(&err));
    }

    #[test]
    fn test_should_not_detect_non_cancel_as_cancellation() {
        let err = anyhow::anyhow!("some other error");
        assert!(!is_user_cancellation(&err));
    }
}
