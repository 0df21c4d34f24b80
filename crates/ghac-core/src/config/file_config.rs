//! File-based configuration implementation.
//!
//! Reads config.yml and hosts.yml from the gh config directory.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{AuthConfig, Config, config_dir};
use crate::errors::ConfigError;
use crate::instance;

/// Configuration backed by gh's YAML files.
#[derive(Debug, Default)]
pub struct FileConfig {
    global: ConfigData,
    hosts: HashMap<String, HostConfig>,
    use_keyring: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigData {
    #[serde(default)]
    prompt: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct HostConfig {
    #[serde(default)]
    oauth_token: Option<String>,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    users: HashMap<String, UserEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct UserEntry {
    #[serde(default)]
    oauth_token: Option<String>,
}

impl FileConfig {
    /// Load configuration from the gh config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_dir())
    }

    /// Load configuration from an explicit directory.
    ///
    /// Missing files are treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let global: ConfigData = read_yaml(&dir.join("config.yml"))?.unwrap_or_default();
        let hosts: HashMap<String, HostConfig> =
            read_yaml(&dir.join("hosts.yml"))?.unwrap_or_default();
        debug!(dir = %dir.display(), hosts = hosts.len(), "loaded gh configuration");

        Ok(Self {
            global,
            hosts: hosts
                .into_iter()
                .map(|(host, cfg)| (instance::normalize_hostname(&host), cfg))
                .collect(),
            use_keyring: true,
        })
    }

    /// Create an empty configuration that never consults the OS keyring.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Skip the OS keyring during token lookup.
    #[must_use]
    pub fn without_keyring(mut self) -> Self {
        self.use_keyring = false;
        self
    }
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

/// Environment variables that carry a token for `hostname`, in priority order.
fn token_env_vars(hostname: &str) -> [&'static str; 2] {
    if instance::is_enterprise(hostname) {
        ["GH_ENTERPRISE_TOKEN", "GITHUB_ENTERPRISE_TOKEN"]
    } else {
        ["GH_TOKEN", "GITHUB_TOKEN"]
    }
}

impl Config for FileConfig {
    fn get(&self, hostname: &str, key: &str) -> Option<String> {
        if !hostname.is_empty()
            && key == "user"
            && let Some(user) = self.active_user(hostname)
        {
            return Some(user);
        }
        match key {
            "prompt" => self.global.prompt.clone(),
            _ => None,
        }
    }

    fn hosts(&self) -> Vec<String> {
        let mut hosts: Vec<String> = self.hosts.keys().cloned().collect();
        hosts.sort();
        hosts
    }

    fn authentication(&self) -> &dyn AuthConfig {
        self
    }
}

impl AuthConfig for FileConfig {
    fn active_token(&self, hostname: &str) -> Option<(String, String)> {
        let hostname = instance::normalize_hostname(hostname);

        for var in token_env_vars(&hostname) {
            if let Ok(token) = std::env::var(var)
                && !token.is_empty()
            {
                return Some((token, var.to_string()));
            }
        }

        if self.use_keyring {
            match crate::keyring_store::get_token(&hostname) {
                Ok(Some(token)) => return Some((token, "keyring".to_string())),
                Ok(None) => {}
                Err(e) => debug!("keyring lookup for {hostname} failed: {e:#}"),
            }
        }

        let host = self.hosts.get(&hostname)?;
        let token = host.oauth_token.clone().or_else(|| {
            let user = host.user.as_ref()?;
            host.users.get(user)?.oauth_token.clone()
        })?;
        Some((token, "hosts.yml".to_string()))
    }

    fn active_user(&self, hostname: &str) -> Option<String> {
        self.hosts
            .get(&instance::normalize_hostname(hostname))?
            .user
            .clone()
    }
}
