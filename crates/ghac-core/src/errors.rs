//! Core error types.

/// Errors raised while loading the gh configuration files.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path of the config file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A config file is not valid YAML for its expected shape.
    #[error("failed to parse config file {path}: {message}")]
    Parse {
        /// Path of the config file.
        path: String,
        /// Parser message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_display_config_error_parse() {
        let err = ConfigError::Parse {
            path: "/home/u/.config/gh/hosts.yml".to_string(),
            message: "invalid type: sequence".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse config file /home/u/.config/gh/hosts.yml: invalid type: sequence",
        );
    }

    #[test]
    fn test_should_display_config_error_read_file() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err = ConfigError::ReadFile {
            path: "/etc/gh/config.yml".to_string(),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/gh/config.yml"));
        assert!(msg.contains("permission denied"));
    }
}
