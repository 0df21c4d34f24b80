//! Read-only access to the gh CLI configuration.
//!
//! As a gh extension, ghac shares gh's `config.yml` and `hosts.yml` rather
//! than keeping state of its own.

mod file_config;
mod memory_config;

use std::path::PathBuf;

pub use file_config::FileConfig;
pub use memory_config::MemoryConfig;

/// Configuration directory path (usually ~/.config/gh).
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("GH_CONFIG_DIR")
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }
    dirs::config_dir().map_or_else(
        || {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
                .join("gh")
        },
        |d| d.join("gh"),
    )
}

/// Configuration trait for accessing settings.
pub trait Config: Send + Sync + std::fmt::Debug {
    /// Get a config value, checking hostname scope first then global.
    fn get(&self, hostname: &str, key: &str) -> Option<String>;

    /// Get a config value with its default.
    fn get_or_default(&self, hostname: &str, key: &str) -> String {
        self.get(hostname, key)
            .unwrap_or_else(|| default_for_key(key).to_string())
    }

    /// Whether interactive prompts are allowed (`prompt` key).
    fn prompt_enabled(&self) -> bool {
        self.get_or_default("", "prompt") != "disabled"
    }

    /// Get the list of hosts with stored credentials.
    fn hosts(&self) -> Vec<String>;

    /// Get authentication configuration.
    fn authentication(&self) -> &dyn AuthConfig;
}

/// Authentication lookups.
pub trait AuthConfig: Send + Sync + std::fmt::Debug {
    /// Get the active token for a hostname. Returns (token, source).
    fn active_token(&self, hostname: &str) -> Option<(String, String)>;

    /// Get the active username for a hostname.
    fn active_user(&self, hostname: &str) -> Option<String>;
}

/// Default configuration values.
pub fn default_for_key(key: &str) -> &str {
    match key {
        "prompt" => "enabled",
        _ => "",
    }
}
