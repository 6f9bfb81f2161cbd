//! Config file parsing for `~/.config/lumina/config.toml`.
//!
//! Every section is optional; a missing or unreadable file yields defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::favorites::default_favorites_path;
use crate::lookup::google_books::GOOGLE_BOOKS_BASE;
use crate::lookup::gutendex::GUTENDEX_BASE;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub favorites: FavoritesConfig,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default = "default_google_books_url")]
    pub google_books_url: String,
    #[serde(default = "default_gutendex_url")]
    pub gutendex_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_google_books_url() -> String {
    GOOGLE_BOOKS_BASE.to_string()
}
fn default_gutendex_url() -> String {
    GUTENDEX_BASE.to_string()
}
fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            google_books_url: default_google_books_url(),
            gutendex_url: default_gutendex_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoritesConfig {
    /// Overrides the platform default location of the favorites file.
    pub path: Option<String>,
}

impl FavoritesConfig {
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(p) => PathBuf::from(p),
            None => default_favorites_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:3030".to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

/// Load config from the default path. Falls back to defaults on any problem.
pub fn load_config() -> AppConfig {
    let Some(path) = config_path() else {
        return AppConfig::default();
    };
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return AppConfig::default(),
    };
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring invalid config file");
            AppConfig::default()
        }
    }
}

/// Return the default config file path (for init and show).
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut p| {
        p.push("lumina");
        p.push("config.toml");
        p
    })
}

/// Write `cfg` to the default path, creating the directory if needed.
pub fn save_config(cfg: &AppConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, toml::to_string_pretty(cfg)?)?;
    Ok(path)
}

/// Set a dotted key such as `providers.request_timeout_secs`.
pub fn set_config_key(cfg: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = key.splitn(2, '.').collect();
    match parts.as_slice() {
        ["providers", sub] => match *sub {
            "google_books_url" => cfg.providers.google_books_url = value.to_string(),
            "gutendex_url" => cfg.providers.gutendex_url = value.to_string(),
            "request_timeout_secs" => {
                cfg.providers.request_timeout_secs =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                    })?
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        },
        ["favorites", "path"] => cfg.favorites.path = Some(value.to_string()),
        ["server", "bind"] => cfg.server.bind = value.to_string(),
        _ => return Err(ConfigError::UnknownKey(key.to_string())),
    }
    Ok(())
}
