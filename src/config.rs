// src/config.rs
// =============================================================================
// Application configuration.
//
// Read from a TOML file, by default <config dir>/repo-finder/config.toml.
// Every field is optional in the file; anything missing keeps its default.
// A missing file is not an error.
//
// Example config.toml:
//
//   api_base = "https://api.github.com"
//   request_timeout_secs = 10
//   max_pages = 1000
//   search_cache_ttl_secs = 300
//
// The REPO_FINDER_API_BASE environment variable overrides `api_base`, which
// is handy for pointing the client at GitHub Enterprise or a local mock.
// =============================================================================

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::pagination::DEFAULT_MAX_PAGES;

pub const API_BASE_ENV: &str = "REPO_FINDER_API_BASE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub api_base: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub max_pages: u32,
    pub search_cache_ttl_secs: u64,
    pub detail_cache_ttl_secs: u64,
    pub theme_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            user_agent: concat!("repo-finder/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: 10,
            max_pages: DEFAULT_MAX_PAGES,
            // Search results go stale faster than repository metadata
            search_cache_ttl_secs: 5 * 60,
            detail_cache_ttl_secs: 10 * 60,
            theme_file: None,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("repo-finder").join("config.toml"))
    }

    // Loads the configuration.
    //
    // An explicit path must exist; the default path may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            },
        };

        if let Ok(base) = std::env::var(API_BASE_ENV) {
            debug!(%base, "api base overridden from environment");
            config.api_base = base;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(AppError::Config("max_pages must be at least 1".to_string()));
        }
        url::Url::parse(&self.api_base)
            .map_err(|e| AppError::Config(format!("invalid api_base '{}': {}", self.api_base, e)))?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn search_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.search_cache_ttl_secs)
    }

    pub fn detail_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.detail_cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base, "https://api.github.com");
        assert_eq!(config.max_pages, 1000);
        assert_eq!(config.search_cache_ttl(), Duration::from_secs(300));
        assert!(config.user_agent.starts_with("repo-finder/"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml("max_pages = 40\nrequest_timeout_secs = 3\n").unwrap();
        assert_eq!(config.max_pages, 40);
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.api_base, "https://api.github.com");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(AppConfig::from_toml("max_page = 40\n").is_err());
    }

    #[test]
    fn test_validate() {
        let config = AppConfig {
            max_pages: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            api_base: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("missing.toml"))).is_err());
    }

    // The only test that touches REPO_FINDER_API_BASE, so parallel tests
    // never see it set
    #[test]
    fn test_api_base_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base = \"https://github.example.com/api/v3\"\nmax_pages = 40\n").unwrap();

        std::env::set_var(API_BASE_ENV, "http://127.0.0.1:8089");
        let overridden = AppConfig::load(Some(&path));
        std::env::set_var(API_BASE_ENV, "not a url");
        let invalid = AppConfig::load(Some(&path));
        std::env::remove_var(API_BASE_ENV);
        let from_file = AppConfig::load(Some(&path));

        let overridden = overridden.unwrap();
        assert_eq!(overridden.api_base, "http://127.0.0.1:8089");
        assert_eq!(overridden.max_pages, 40);
        assert!(matches!(invalid, Err(AppError::Config(_))));
        assert_eq!(from_file.unwrap().api_base, "https://github.example.com/api/v3");
    }
}
