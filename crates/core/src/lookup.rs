//! Catalog lookup via the two book providers (Google Books and Gutendex).
//!
//! Each provider is an adapter that translates its own response schema into
//! [`Book`]. Adapters report failures as [`LookupError`] through `try_fetch`;
//! the provided `fetch` methods absorb those failures into an empty list,
//! since either catalog may be unavailable at any time.

pub mod google_books;
pub mod gutendex;

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::book::Book;
use crate::config::ProvidersConfig;
use crate::error::LookupError;

/// Reserved query that asks Gutendex for its default listing instead of a search.
pub const POPULAR: &str = "popular";

/// Volume search with caller-controlled pagination (Google Books).
#[async_trait]
pub trait VolumeCatalog: Send + Sync {
    fn name(&self) -> &'static str;

    async fn try_fetch(&self, query: &str, opts: LookupOptions) -> Result<Vec<Book>, LookupError>;

    /// Like `try_fetch`, but any failure yields an empty list.
    async fn fetch(&self, query: &str, opts: LookupOptions) -> Vec<Book> {
        absorb(self.name(), self.try_fetch(query, opts).await)
    }
}

/// Single-page search over the public-domain corpus (Gutendex).
///
/// The query [`POPULAR`] selects the provider's default listing.
#[async_trait]
pub trait PublicDomainCatalog: Send + Sync {
    fn name(&self) -> &'static str;

    async fn try_fetch(&self, query: &str) -> Result<Vec<Book>, LookupError>;

    /// Like `try_fetch`, but any failure yields an empty list.
    async fn fetch(&self, query: &str) -> Vec<Book> {
        absorb(self.name(), self.try_fetch(query).await)
    }
}

/// Pagination for [`VolumeCatalog`] lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOptions {
    pub start_index: u32,
    pub max_results: u32,
}

impl LookupOptions {
    /// `max_results` is raised to 1 if zero is passed.
    pub fn new(start_index: u32, max_results: u32) -> Self {
        Self {
            start_index,
            max_results: max_results.max(1),
        }
    }
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            start_index: 0,
            max_results: 20,
        }
    }
}

/// Turn a provider failure into "no results", logging which provider failed.
pub(crate) fn absorb(provider: &str, result: Result<Vec<Book>, LookupError>) -> Vec<Book> {
    match result {
        Ok(books) => books,
        Err(e) => {
            warn!(provider, error = %e, "catalog provider failed, continuing without it");
            Vec::new()
        }
    }
}

/// Shared HTTP client honoring the configured request timeout.
pub fn http_client(cfg: &ProvidersConfig) -> Result<reqwest::Client, LookupError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.request_timeout_secs))
        .user_agent(concat!("lumina/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(LookupError::Client)
}
