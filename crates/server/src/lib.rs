//! HTTP front-end for the Lumina aggregator.
//!
//! Exposes search, trending, topic browsing and related-book lookups as JSON,
//! plus a favorites list persisted through `lumina-core`'s favorites store.

pub mod api;
pub mod config;

use std::sync::{Arc, Mutex};

use axum::Router;

use lumina_core::aggregate::Aggregator;
use lumina_core::error::LuminaError;
use lumina_core::favorites::FavoritesStore;

use crate::config::ServerConfig;

/// Shared application state (aggregator, favorites and config).
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Aggregator,
    pub favorites: Arc<Mutex<FavoritesStore>>,
    pub config: ServerConfig,
}

impl AppState {
    /// State backed by the real catalog providers.
    pub fn new(config: ServerConfig) -> Result<Self, LuminaError> {
        let aggregator = Aggregator::from_config(&config.providers)?;
        Self::with_aggregator(config, aggregator)
    }

    pub fn with_aggregator(config: ServerConfig, aggregator: Aggregator) -> Result<Self, LuminaError> {
        let favorites = FavoritesStore::open(&config.favorites_path)?;
        Ok(Self {
            aggregator,
            favorites: Arc::new(Mutex::new(favorites)),
            config,
        })
    }
}

/// Build API routes (under /api) with state.
pub fn api_routes(state: AppState) -> Router {
    api::routes(state)
}
