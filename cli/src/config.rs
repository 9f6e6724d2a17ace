//! Configuration file handling for the CLI.
//!
//! Stores endpoint overrides and the last moderator email in
//! `$XDG_CONFIG_HOME/volun-mod/config.toml`. Sessions are never written here.

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use volun_business::BusinessConfig;

/// CLI configuration stored on disk
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Last moderator email used, prefills the login prompt
    pub last_email: Option<String>,
    /// Endpoint overrides
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointConfig {
    pub api_base_url: Option<String>,
    pub identity_base_url: Option<String>,
    pub identity_api_key: Option<String>,
}

impl Config {
    /// Get the configuration file path.
    ///
    /// Returns `$XDG_CONFIG_HOME/volun-mod/config.toml` on Linux,
    /// appropriate paths on other platforms.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to determine config directory")?;

        Ok(config_dir.join("volun-mod").join("config.toml"))
    }

    /// Load configuration from `path`.
    ///
    /// Returns default configuration if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration to `path`, creating the parent directory.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Resolves the business config.
    ///
    /// `base` comes from the environment; file values fill in only what the
    /// environment left at its default, and `api_url` (flag or env) wins over
    /// both.
    pub fn business_config(&self, base: BusinessConfig, api_url: Option<&str>) -> BusinessConfig {
        let defaults = BusinessConfig::default();
        let mut config = base;

        if config.api_base_url == defaults.api_base_url
            && let Some(url) = &self.endpoints.api_base_url
        {
            config.api_base_url = trim_url(url);
        }
        if config.identity_base_url == defaults.identity_base_url
            && let Some(url) = &self.endpoints.identity_base_url
        {
            config.identity_base_url = trim_url(url);
        }
        if config.identity_api_key.is_none() {
            config.identity_api_key = self
                .endpoints
                .identity_api_key
                .clone()
                .filter(|key| !key.trim().is_empty());
        }
        if let Some(url) = api_url {
            config.api_base_url = trim_url(url);
        }

        config
    }

    pub fn remember_email(&mut self, email: &str) -> bool {
        if self.last_email.as_deref() == Some(email) {
            return false;
        }
        self.last_email = Some(email.to_owned());
        true
    }
}

/// The config file as read at startup.
///
/// Write-back is only allowed when the file was read cleanly (or did not
/// exist yet), so an unreadable file is never replaced with defaults.
#[derive(Debug, Default)]
pub struct StoredConfig {
    pub config: Config,
    writable_path: Option<PathBuf>,
}

impl StoredConfig {
    /// Opens the file at the default location.
    pub fn open_default() -> Self {
        match Config::config_path() {
            Ok(path) => Self::open(path),
            Err(e) => {
                warn!("No config location: {e:#}");
                Self::default()
            }
        }
    }

    pub fn open(path: PathBuf) -> Self {
        match Config::load_from(&path) {
            Ok(config) => Self {
                config,
                writable_path: Some(path),
            },
            Err(e) => {
                warn!("Ignoring config file, it will not be rewritten: {e:#}");
                Self::default()
            }
        }
    }

    /// Records the last email and writes the file when it changed.
    ///
    /// Returns whether the file was written.
    pub fn remember_email(&mut self, email: &str) -> Result<bool> {
        if !self.config.remember_email(email) {
            return Ok(false);
        }
        let Some(path) = &self.writable_path else {
            return Ok(false);
        };
        self.config.save_to(path)?;
        Ok(true)
    }
}

fn trim_url(url: &str) -> String {
    url.trim_end_matches('/').to_owned()
}
