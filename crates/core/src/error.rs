/// Top-level error type for fallible operations outside the aggregation path.
#[derive(Debug, thiserror::Error)]
pub enum LuminaError {
    #[error("Catalog lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Favorites error: {0}")]
    Favorites(#[from] FavoritesError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Failure of a single provider call. Never surfaces past the aggregator.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Network error from {provider}: {source}")]
    Network {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Provider {provider} returned HTTP {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("Malformed response from {provider}: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Provider task for {provider} did not complete: {message}")]
    Task { provider: &'static str, message: String },

    #[error("Could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl LookupError {
    /// Name of the provider this failure belongs to, if any.
    pub fn provider(&self) -> Option<&'static str> {
        match self {
            LookupError::Network { provider, .. }
            | LookupError::Status { provider, .. }
            | LookupError::Decode { provider, .. }
            | LookupError::Task { provider, .. } => Some(provider),
            LookupError::Client(_) => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    #[error("Could not write favorites to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read favorites from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Favorites serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No favorite with id {0}")]
    NotFound(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
