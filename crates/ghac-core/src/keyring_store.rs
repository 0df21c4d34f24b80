//! Read-only access to tokens gh stored in the OS keyring.

use anyhow::{Context, Result};

/// Keyring service name gh uses for a host.
pub fn service_name(hostname: &str) -> String {
    format!("gh:{hostname}")
}

/// Retrieve the active token gh stored for `hostname`.
///
/// gh keeps the active account's token under an empty user name.
///
/// # Errors
///
/// Returns an error if the keyring backend is unavailable.
pub fn get_token(hostname: &str) -> Result<Option<String>> {
    let entry = keyring::Entry::new(&service_name(hostname), "")
        .context("failed to create keyring entry")?;

    match entry.get_password() {
        Ok(token) if token.is_empty() => Ok(None),
        Ok(token) => Ok(Some(token)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(anyhow::anyhow!("keyring error: {e}")),
    }
}
