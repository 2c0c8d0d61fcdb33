//! Configuration management for Threadcast

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::api::Language;
use crate::error::{ConfigError, Result};
use crate::rate_limit::DEFAULT_DAILY_QUOTA;
use crate::thread::DEFAULT_THREAD_PARTS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend serving the generation and posting endpoints
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Daily posting quota assumed before the first authoritative fetch
    #[serde(default = "default_daily_quota")]
    pub daily_quota: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Language used for generation unless overridden
    #[serde(default)]
    pub language: Language,

    /// Part count for a fresh thread draft
    #[serde(default = "default_thread_parts")]
    pub thread_parts: usize,
}

fn default_daily_quota() -> u32 {
    DEFAULT_DAILY_QUOTA
}

fn default_thread_parts() -> usize {
    DEFAULT_THREAD_PARTS
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            daily_quota: default_daily_quota(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            thread_parts: default_thread_parts(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when no file exists
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| Self::default_config())
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:3000".to_string(),
            },
            limits: LimitsConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("THREADCAST_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("threadcast").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "http://localhost:8080"

[limits]
daily_quota = 25

[defaults]
language = "hinglish"
thread_parts = 4
"#
        )
        .unwrap();

        let config = Config::load_from_path(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.limits.daily_quota, 25);
        assert_eq!(config.defaults.language, Language::Hinglish);
        assert_eq!(config.defaults.thread_parts, 4);
    }

    #[test]
    fn test_load_from_path_applies_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "http://localhost:8080"
"#
        )
        .unwrap();

        let config = Config::load_from_path(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.limits.daily_quota, DEFAULT_DAILY_QUOTA);
        assert_eq!(config.defaults.language, Language::English);
        assert_eq!(config.defaults.thread_parts, DEFAULT_THREAD_PARTS);
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let path = PathBuf::from("/nonexistent/threadcast/config.toml");
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_config();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.limits.daily_quota, DEFAULT_DAILY_QUOTA);
    }
}
