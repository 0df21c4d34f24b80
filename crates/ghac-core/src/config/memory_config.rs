//! In-memory configuration used by tests.

use std::collections::HashMap;

use super::{AuthConfig, Config};

/// Configuration held entirely in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryConfig {
    settings: HashMap<String, String>,
    // hostname -> (user, token)
    auth: HashMap<String, (String, String)>,
}

impl MemoryConfig {
    /// Create a new empty in-memory configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an authenticated host with the given username and token.
    #[must_use]
    pub fn with_host(mut self, hostname: &str, username: &str, token: &str) -> Self {
        self.auth.insert(
            hostname.to_string(),
            (username.to_string(), token.to_string()),
        );
        self
    }

    /// Set a global setting such as `prompt`.
    #[must_use]
    pub fn with_setting(mut self, key: &str, value: &str) -> Self {
        self.settings.insert(key.to_string(), value.to_string());
        self
    }
}

impl Config for MemoryConfig {
    fn get(&self, _hostname: &str, key: &str) -> Option<String> {
        self.settings.get(key).cloned()
    }

    fn hosts(&self) -> Vec<String> {
        let mut hosts: Vec<String> = self.auth.keys().cloned().collect();
        hosts.sort();
        hosts
    }

    fn authentication(&self) -> &dyn AuthConfig {
        self
    }
}

impl AuthConfig for MemoryConfig {
    fn active_token(&self, hostname: &str) -> Option<(String, String)> {
        let (_, token) = self.auth.get(hostname)?;
        Some((token.clone(), "config".to_string()))
    }

    fn active_user(&self, hostname: &str) -> Option<String> {
        self.auth.get(hostname).map(|(user, _)| user.clone())
    }
}
