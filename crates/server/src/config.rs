//! Server configuration (bind address, favorites file, provider endpoints).

use std::path::PathBuf;

use lumina_core::config::{AppConfig, ProvidersConfig};

/// Configuration for the Lumina server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host:port to bind (e.g. "127.0.0.1:3030" or "0.0.0.0:3030").
    pub bind: String,
    /// JSON file holding saved books.
    pub favorites_path: PathBuf,
    pub providers: ProvidersConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::default())
    }
}

impl ServerConfig {
    pub fn from_app_config(cfg: &AppConfig) -> Self {
        Self {
            bind: cfg.server.bind.clone(),
            favorites_path: cfg.favorites.resolved_path(),
            providers: cfg.providers.clone(),
        }
    }

    /// Build config from the config file, then apply environment overrides.
    /// - `LUMINA_BIND`: host:port (default from config, else 127.0.0.1:3030)
    /// - `LUMINA_FAVORITES_PATH`: favorites JSON file
    pub fn from_env() -> Self {
        let mut c = Self::from_app_config(&lumina_core::config::load_config());
        if let Ok(b) = std::env::var("LUMINA_BIND") {
            c.bind = b;
        }
        if let Ok(p) = std::env::var("LUMINA_FAVORITES_PATH") {
            c.favorites_path = PathBuf::from(p);
        }
        c
    }

    pub fn bind_addr(&self) -> &str {
        &self.bind
    }
}
