use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/locale-tool/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("locale-tool").join("config.toml")
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The service base URL is an absolute http(s) URL
    /// - Timeouts are non-zero
    /// - Intake rules can accept at least one file
    /// - The default template type is one of the available ones
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = &self.service.base_url;
        match reqwest::Url::parse(base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "Service base_url '{}' must use http or https, not '{}'",
                        base_url,
                        url.scheme()
                    ),
                });
            }
            Err(e) => {
                return Err(ConfigError::ValidationError {
                    message: format!("Service base_url '{}' is not a valid URL: {}", base_url, e),
                });
            }
        }

        if self.service.timeout_seconds == 0 || self.service.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Service timeouts must be greater than zero".to_string(),
            });
        }

        if self.intake.accepted_suffix.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Intake accepted_suffix must not be empty".to_string(),
            });
        }

        if self.intake.max_file_bytes == 0 {
            return Err(ConfigError::ValidationError {
                message: "Intake max_file_bytes must be greater than zero".to_string(),
            });
        }

        if self.templates.available.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "At least one template type must be available".to_string(),
            });
        }

        let default = &self.templates.default;
        if !self.templates.available.iter().any(|t| t == default) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Default template type '{}' not found in available template types",
                    default
                ),
            });
        }

        Ok(())
    }
}
