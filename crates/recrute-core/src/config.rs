//! Configuration management for recrute.
//!
//! Loads configuration from ${RECRUTE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable overriding `api_url`.
pub const API_URL_ENV: &str = "RECRUTE_API_URL";

pub mod paths {
    //! Path resolution for recrute configuration and session data.
    //!
    //! RECRUTE_HOME resolution order:
    //! 1. RECRUTE_HOME environment variable (if set)
    //! 2. ~/.config/recrute (default)

    use std::path::PathBuf;

    /// Returns the recrute home directory.
    pub fn recrute_home() -> PathBuf {
        if let Ok(home) = std::env::var("RECRUTE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".recrute"),
            |h| h.join(".config").join("recrute"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        recrute_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        recrute_home().join("session.json")
    }
}

/// Offer browsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OffersConfig {
    /// Offers fetched per page
    pub page_size: u32,
}

impl Default for OffersConfig {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the recruitment API
    pub api_url: String,

    /// Transport timeout in seconds (0 disables)
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub offers: OffersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            request_timeout_secs: 30,
            offers: OffersConfig::default(),
        }
    }
}

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

impl Config {
    pub const DEFAULT_API_URL: &'static str = "http://localhost:8000";

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default template to `path`.
    ///
    /// Fails if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Resolves the API base URL, honoring `RECRUTE_API_URL`.
    pub fn effective_api_url(&self) -> Result<Url> {
        let raw = std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.api_url.clone());
        Url::parse(raw.trim()).with_context(|| format!("Invalid API URL '{raw}'"))
    }

    /// Transport timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.api_url, Config::DEFAULT_API_URL);
        assert_eq!(config.offers.page_size, 10);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "request_timeout_secs = 0\n[offers]\npage_size = 25\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_url, Config::DEFAULT_API_URL);
        assert_eq!(config.offers.page_size, 25);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config.api_url, Config::DEFAULT_API_URL);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::init(&path).unwrap();
        assert!(path.exists());

        let err = Config::init(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }
}
