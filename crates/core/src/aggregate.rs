//! Fan-out over both catalog providers.
//!
//! [`Aggregator`] is the single entry point consumers use. Every operation
//! returns a plain `Vec<Book>`: provider failures are logged and treated as
//! "no results from that provider", so an empty list may mean either "nothing
//! matched" or "both providers were down".

use std::sync::Arc;

use tracing::debug;

use crate::book::Book;
use crate::config::ProvidersConfig;
use crate::dedup::dedup_by_title;
use crate::error::LookupError;
use crate::lookup::google_books::GoogleBooksProvider;
use crate::lookup::gutendex::GutendexProvider;
use crate::lookup::{absorb, LookupOptions, PublicDomainCatalog, VolumeCatalog, POPULAR};
use crate::merge::{merge, ProviderOutcome};
use crate::related::{related_query, RELATED_PAGE_SIZE};

/// Google Books query backing the trending listing.
pub const TRENDING_QUERY: &str = "classic fiction";
pub const TRENDING_PAGE_SIZE: u32 = 20;

/// Queries Google Books and Gutendex and merges their results.
///
/// Providers are injected so tests (and alternative deployments) can swap in
/// their own implementations.
#[derive(Clone)]
pub struct Aggregator {
    volumes: Arc<dyn VolumeCatalog>,
    public_domain: Arc<dyn PublicDomainCatalog>,
}

impl Aggregator {
    pub fn new(volumes: Arc<dyn VolumeCatalog>, public_domain: Arc<dyn PublicDomainCatalog>) -> Self {
        Self {
            volumes,
            public_domain,
        }
    }

    /// Aggregator over the real Google Books and Gutendex endpoints.
    pub fn from_config(cfg: &ProvidersConfig) -> Result<Self, LookupError> {
        Ok(Self::new(
            Arc::new(GoogleBooksProvider::from_config(cfg)?),
            Arc::new(GutendexProvider::from_config(cfg)?),
        ))
    }

    /// Search both providers. Google Books results come first, then
    /// duplicates by title are removed.
    pub async fn search(&self, query: &str) -> Vec<Book> {
        if query.trim().is_empty() {
            debug!("blank search query, skipping providers");
            return Vec::new();
        }
        let (volumes, public_domain) = self
            .fan_out(query, LookupOptions::default(), query)
            .await;
        dedup_by_title(merge([volumes, public_domain]))
    }

    /// Default front-page listing: Gutendex's popular books first, then
    /// Google Books classics. Not deduplicated.
    pub async fn trending(&self) -> Vec<Book> {
        let (volumes, public_domain) = self
            .fan_out(
                TRENDING_QUERY,
                LookupOptions::new(0, TRENDING_PAGE_SIZE),
                POPULAR,
            )
            .await;
        merge([public_domain, volumes])
    }

    pub async fn by_topic(&self, topic: &str) -> Vec<Book> {
        self.search(topic).await
    }

    /// Google Books titles sharing the seed's first category (or first
    /// author). The seed itself may appear in the result; callers filter it
    /// with [`crate::related::exclude_seed`].
    pub async fn related(&self, book: &Book) -> Vec<Book> {
        let Some(query) = related_query(book) else {
            debug!(id = %book.id, "no category or author to relate on");
            return Vec::new();
        };
        let result = self
            .volumes
            .try_fetch(&query, LookupOptions::new(0, RELATED_PAGE_SIZE))
            .await;
        absorb(self.volumes.name(), result)
    }

    /// Start both provider calls, then wait for both outcomes.
    async fn fan_out(
        &self,
        volume_query: &str,
        opts: LookupOptions,
        public_domain_query: &str,
    ) -> (ProviderOutcome, ProviderOutcome) {
        let volumes = Arc::clone(&self.volumes);
        let query = volume_query.to_string();
        let volume_task = tokio::spawn(async move { volumes.try_fetch(&query, opts).await });

        let public_domain = Arc::clone(&self.public_domain);
        let query = public_domain_query.to_string();
        let public_domain_task = tokio::spawn(async move { public_domain.try_fetch(&query).await });

        let (volume_result, public_domain_result) = tokio::join!(volume_task, public_domain_task);
        (
            outcome(self.volumes.name(), volume_result),
            outcome(self.public_domain.name(), public_domain_result),
        )
    }
}

fn outcome(
    provider: &'static str,
    joined: Result<Result<Vec<Book>, LookupError>, tokio::task::JoinError>,
) -> ProviderOutcome {
    let result = joined.unwrap_or_else(|e| {
        Err(LookupError::Task {
            provider,
            message: e.to_string(),
        })
    });
    ProviderOutcome::new(provider, result)
}
