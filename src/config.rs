//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_API_BASE;

pub const ENV_API_URL: &str = "AGENTDESK_API_URL";
pub const ENV_SESSION_FILE: &str = "AGENTDESK_SESSION_FILE";
pub const ENV_LOG_LEVEL: &str = "AGENTDESK_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "AGENTDESK_LOG_FORMAT";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Back-office API connection
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Where the CLI keeps the session cookie between invocations
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_file")]
    pub cookie_file: PathBuf,
}

fn default_cookie_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("agentdesk").join("session.json"))
        .unwrap_or_else(|| PathBuf::from("./.agentdesk_session.json"))
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_file: default_cookie_file(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load an explicitly requested file, or fall back to the default lookup
    ///
    /// A missing explicit file is an error; missing default files are not.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("agentdesk").join("config.toml")),
            Some(PathBuf::from("./agentdesk.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.base_url = url;
        }
        if let Some(file) = lookup(ENV_SESSION_FILE) {
            self.session.cookie_file = PathBuf::from(file);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# AgentDesk Configuration
#
# Environment variables override these settings:
# - {ENV_API_URL}
# - {ENV_SESSION_FILE}
# - {ENV_LOG_LEVEL}
# - {ENV_LOG_FORMAT}

[api]
# Base URL of the back-office REST API
base_url = "{DEFAULT_API_BASE}"

[session]
# File holding the session cookie between commands
# cookie_file = "~/.local/share/agentdesk/session.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for terminals) or json (for log collectors)
format = "pretty"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api/v1");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"https://desk.example.com/api/v1\"").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.api.base_url, "https://desk.example.com/api/v1");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn test_parse_error_names_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();

        let err = Config::load(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::resolve(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "http://10.0.0.5:8000/api/v1"),
            (ENV_LOG_FORMAT, "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://10.0.0.5:8000/api/v1");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }
}
