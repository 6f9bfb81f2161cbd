//! Google Books catalog provider.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::book::{AccessInfo, Book, ImageLinks, VolumeInfo, UNKNOWN_AUTHOR};
use crate::config::ProvidersConfig;
use crate::error::LookupError;
use crate::lookup::{http_client, LookupOptions, VolumeCatalog};

pub const GOOGLE_BOOKS_BASE: &str = "https://www.googleapis.com/books/v1";

const PROVIDER: &str = "google_books";

/// Viewability of volumes that expose no readable pages at all.
const NO_PAGES: &str = "NO_PAGES";

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    id: String,
    #[serde(default)]
    etag: String,
    #[serde(default)]
    self_link: String,
    #[serde(default)]
    volume_info: RawVolumeInfo,
    access_info: Option<AccessInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVolumeInfo {
    title: Option<String>,
    subtitle: Option<String>,
    authors: Option<Vec<String>>,
    publisher: Option<String>,
    published_date: Option<String>,
    description: Option<String>,
    page_count: Option<u32>,
    categories: Option<Vec<String>>,
    average_rating: Option<f64>,
    ratings_count: Option<u32>,
    image_links: Option<ImageLinks>,
    language: Option<String>,
    preview_link: Option<String>,
    info_link: Option<String>,
    canonical_volume_link: Option<String>,
}

/// Free, English-language books from the Google Books volumes endpoint.
pub struct GoogleBooksProvider {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleBooksProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: GOOGLE_BOOKS_BASE.to_string(),
        }
    }

    pub fn from_config(cfg: &ProvidersConfig) -> Result<Self, LookupError> {
        Ok(Self {
            client: http_client(cfg)?,
            base_url: cfg.google_books_url.clone(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

impl Default for GoogleBooksProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VolumeCatalog for GoogleBooksProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn try_fetch(&self, query: &str, opts: LookupOptions) -> Result<Vec<Book>, LookupError> {
        let url = format!("{}/volumes", self.base_url.trim_end_matches('/'));
        let max_results = opts.max_results.to_string();
        let start_index = opts.start_index.to_string();
        debug!(%url, query, start_index = opts.start_index, max_results = opts.max_results, "Google Books search");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("filter", "free-ebooks"),
                ("printType", "books"),
                ("maxResults", max_results.as_str()),
                ("startIndex", start_index.as_str()),
                ("langRestrict", "en"),
            ])
            .send()
            .await
            .map_err(|source| LookupError::Network { provider: PROVIDER, source })?;

        if !resp.status().is_success() {
            return Err(LookupError::Status {
                provider: PROVIDER,
                status: resp.status().as_u16(),
            });
        }

        let body: VolumesResponse = resp
            .json()
            .await
            .map_err(|source| LookupError::Decode { provider: PROVIDER, source })?;

        Ok(volumes_to_books(body))
    }
}

fn volumes_to_books(body: VolumesResponse) -> Vec<Book> {
    body.items
        .unwrap_or_default()
        .into_iter()
        .map(volume_to_book)
        .filter(|b| b.access_info.viewability != NO_PAGES)
        .collect()
}

fn volume_to_book(v: Volume) -> Book {
    let info = v.volume_info;
    let authors = match info.authors {
        Some(a) if !a.is_empty() => a,
        _ => vec![UNKNOWN_AUTHOR.to_string()],
    };
    Book {
        id: v.id,
        etag: v.etag,
        self_link: v.self_link,
        volume_info: VolumeInfo {
            title: info.title.unwrap_or_default(),
            subtitle: info.subtitle,
            authors,
            publisher: info.publisher,
            published_date: info.published_date,
            description: info.description,
            page_count: info.page_count,
            categories: info.categories.unwrap_or_default(),
            average_rating: info.average_rating,
            ratings_count: info.ratings_count,
            image_links: info.image_links,
            language: info.language,
            preview_link: info.preview_link,
            info_link: info.info_link,
            canonical_volume_link: info.canonical_volume_link,
        },
        access_info: v.access_info.unwrap_or_default(),
    }
}
