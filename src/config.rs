//! Configuration file support for relo
//!
//! Config is loaded from `~/.relo/config.toml` (or `$RELO_HOME/config.toml`).
//! Environment variables override config file settings.

use crate::storage::relo_dir;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global config instance (loaded once on first access)
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::load)
}

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Backend connection settings
    pub backend: BackendConfig,

    /// Display/UI configuration
    pub display: DisplayConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the Relocate Me backend (without the `/api` prefix)
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Timeout for extension archive downloads in seconds
    pub download_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            download_timeout_secs: 120,
        }
    }
}

/// Display/UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Where downloaded extension archives are saved.
    /// Defaults to the platform download directory, falling back to cwd.
    pub download_dir: Option<PathBuf>,
    /// Animate the loading spinner
    pub spinner: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            download_dir: None,
            spinner: true,
        }
    }
}

impl Config {
    /// Load config from disk, falling back to defaults on any problem.
    /// `$RELO_BACKEND_URL` overrides the configured base URL.
    pub fn load() -> Self {
        let mut config = Self::load_file().unwrap_or_default();

        if let Ok(url) = std::env::var("RELO_BACKEND_URL") {
            if !url.is_empty() {
                config.backend.base_url = url;
            }
        }

        config
    }

    fn load_file() -> Option<Self> {
        let path = relo_dir().ok()?.join("config.toml");
        let content = std::fs::read_to_string(path).ok()?;
        Self::from_toml(&content)
    }

    fn from_toml(content: &str) -> Option<Self> {
        match toml::from_str(content) {
            Ok(config) => Some(config),
            Err(e) => {
                crate::logging::warn(&format!("Failed to parse config.toml: {}", e));
                None
            }
        }
    }

    /// Directory where extension downloads are saved.
    pub fn download_dir(&self) -> PathBuf {
        if let Some(dir) = &self.display.download_dir {
            return dir.clone();
        }
        dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
    }
}
