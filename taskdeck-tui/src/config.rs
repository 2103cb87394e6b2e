use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::session_store;

pub const API_URL_ENV: &str = "TASKDECK_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskdeckConfig {
    /// Base URL of the task API, e.g. "https://taskmanager-backend-six.vercel.app"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// `tracing` filter directive used when RUST_LOG is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_api_url() -> String {
    "https://taskmanager-backend-six.vercel.app".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for TaskdeckConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            log_filter: default_log_filter(),
        }
    }
}

impl TaskdeckConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(session_store::root_path()?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(session_store::root_path()?.join("taskdeck.log"))
    }

    /// Load config from disk and apply environment overrides.
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_path()?)?;
        Ok(config.with_api_url_override(std::env::var(API_URL_ENV).ok()))
    }

    /// Returns default config if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }

    /// Write the default config unless a file is already there.
    pub fn ensure_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            Self::default().save_to(path)?;
        }
        Ok(())
    }

    fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TaskdeckConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, TaskdeckConfig::default());
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = \"http://localhost:3000\"\n").unwrap();

        let config = TaskdeckConfig::load_from(&path).unwrap();

        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn ensure_exists_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        TaskdeckConfig::ensure_exists(&path).unwrap();
        let custom = TaskdeckConfig {
            log_filter: "debug".to_string(),
            ..TaskdeckConfig::default()
        };
        custom.save_to(&path).unwrap();
        TaskdeckConfig::ensure_exists(&path).unwrap();

        assert_eq!(TaskdeckConfig::load_from(&path).unwrap(), custom);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = ").unwrap();

        let err = TaskdeckConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn env_override_replaces_api_url_when_set() {
        let config = TaskdeckConfig::default();
        assert_eq!(
            config
                .clone()
                .with_api_url_override(Some("http://localhost:5000".to_string()))
                .api_url,
            "http://localhost:5000"
        );
        assert_eq!(
            config.clone().with_api_url_override(Some("  ".to_string())),
            config
        );
        assert_eq!(config.clone().with_api_url_override(None), config);
    }
}
