//! Configuration management.
//!
//! Configuration is read from `~/.config/readstash/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is
//! created. Missing fields deserialize to their defaults, so partial files
//! are fine.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::poll::PollConfig;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub poll: PollSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backend, including the API prefix.
    pub base_url: String,
    /// Bearer token sent on every request when present. Without one the
    /// client still works against backends that don't require auth.
    pub auth_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v1".to_string(),
            auth_token: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    /// Milliseconds between status fetches while an item is processing.
    pub interval_ms: u64,
    /// How long the "all done" checklist stays up before the preview opens.
    pub ready_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: 2_000,
            ready_delay_ms: 1_200,
            request_timeout_secs: 10,
        }
    }
}

impl PollSettings {
    pub fn to_poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(self.interval_ms),
            ready_delay: Duration::from_millis(self.ready_delay_ms),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/readstash/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("readstash").join("config.toml"))
    }

    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let default_config = Self::default_config_content();

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(default_config.as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# readstash configuration

[api]
# Base URL of the backend, including the API prefix.
base_url = "http://localhost:8000/api/v1"

# Bearer token sent with every request. Leave commented out if the backend
# does not require authentication.
# auth_token = "..."

[poll]
# Milliseconds between status checks while an article is processing.
interval_ms = 2000

# How long (ms) the completed checklist is shown before the preview opens.
ready_delay_ms = 1200

# Per-request timeout in seconds.
request_timeout_secs = 10
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.api.base_url, "http://localhost:8000/api/v1");
        assert_eq!(config.poll.interval_ms, 2000);
        assert_eq!(config.poll.ready_delay_ms, 1200);
        assert!(config.api.auth_token.is_none());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[api]
auth_token = "tok"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.api.auth_token.as_deref(), Some("tok"));
        // Untouched sections keep their defaults
        assert_eq!(config.api.base_url, "http://localhost:8000/api/v1");
        assert_eq!(config.poll.interval_ms, 2000);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.poll.request_timeout_secs, 10);
    }

    #[test]
    fn test_create_default_config_writes_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readstash").join("config.toml");

        Config::create_default_config(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let config: Config = toml::from_str(&content).expect("Written config should parse back");
        assert_eq!(config.poll.interval_ms, 2000);
    }

    #[test]
    fn test_poll_settings_conversion() {
        let poll = PollSettings::default().to_poll_config();
        assert_eq!(poll.interval, Duration::from_secs(2));
        assert_eq!(poll.ready_delay, Duration::from_millis(1200));
    }
}
