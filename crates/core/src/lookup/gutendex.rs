//! Gutendex (Project Gutenberg) catalog provider.
//!
//! Gutendex has no notion of access info, publication date or synopsis, so
//! every record is translated into a full-access public-domain [`Book`] with
//! fixed placeholder values for the missing fields.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::book::{AccessInfo, Book, FormatAvailability, ImageLinks, VolumeInfo, UNKNOWN_AUTHOR};
use crate::config::ProvidersConfig;
use crate::error::LookupError;
use crate::lookup::{http_client, PublicDomainCatalog, POPULAR};

pub const GUTENDEX_BASE: &str = "https://gutendex.com";

/// Prefix that keeps Gutendex ids apart from Google Books ids.
pub const ID_PREFIX: &str = "gutendex-";

pub const PUBLISHED_DATE: &str = "Public Domain";
pub const DESCRIPTION: &str = "This book is part of the Project Gutenberg collection. It is available in the public domain for free.";

const PROVIDER: &str = "gutendex";

const MIME_HTML: &str = "text/html";
const MIME_HTML_UTF8: &str = "text/html; charset=utf-8";
const MIME_TEXT: &str = "text/plain";
const MIME_JPEG: &str = "image/jpeg";
const MIME_EPUB: &str = "application/epub+zip";
const MIME_PDF: &str = "application/pdf";

#[derive(Debug, Deserialize)]
struct GutendexPage {
    #[serde(default)]
    results: Vec<GutendexBook>,
}

#[derive(Debug, Deserialize)]
struct GutendexBook {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    authors: Vec<GutendexPerson>,
    #[serde(default)]
    subjects: Vec<String>,
    #[serde(default)]
    languages: Vec<String>,
    #[serde(default)]
    formats: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct GutendexPerson {
    name: String,
}

/// Public-domain books from Gutendex.
pub struct GutendexProvider {
    client: reqwest::Client,
    base_url: String,
}

impl GutendexProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: GUTENDEX_BASE.to_string(),
        }
    }

    pub fn from_config(cfg: &ProvidersConfig) -> Result<Self, LookupError> {
        Ok(Self {
            client: http_client(cfg)?,
            base_url: cfg.gutendex_url.clone(),
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

impl Default for GutendexProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PublicDomainCatalog for GutendexProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn try_fetch(&self, query: &str) -> Result<Vec<Book>, LookupError> {
        let url = format!("{}/books", self.base_url.trim_end_matches('/'));
        let mut request = self.client.get(&url);
        if query != POPULAR {
            request = request.query(&[("search", query)]);
        }
        debug!(%url, query, "Gutendex lookup");

        let resp = request
            .send()
            .await
            .map_err(|source| LookupError::Network { provider: PROVIDER, source })?;

        if !resp.status().is_success() {
            return Err(LookupError::Status {
                provider: PROVIDER,
                status: resp.status().as_u16(),
            });
        }

        let page: GutendexPage = resp
            .json()
            .await
            .map_err(|source| LookupError::Decode { provider: PROVIDER, source })?;

        Ok(page.results.into_iter().map(to_book).collect())
    }
}

fn to_book(item: GutendexBook) -> Book {
    let id = item.id;
    let link = |mime: &str| item.formats.get(mime).filter(|l| !l.is_empty()).cloned();
    let html = link(MIME_HTML).or_else(|| link(MIME_HTML_UTF8));
    let preview_link = html.clone().or_else(|| link(MIME_TEXT));
    let epub = link(MIME_EPUB);
    let pdf = link(MIME_PDF);
    let thumbnail = link(MIME_JPEG);

    let mut authors: Vec<String> = item.authors.into_iter().map(|a| a.name).collect();
    if authors.is_empty() {
        authors.push(UNKNOWN_AUTHOR.to_string());
    }

    Book {
        id: format!("{ID_PREFIX}{id}"),
        etag: format!("{ID_PREFIX}{id}"),
        self_link: format!("{GUTENDEX_BASE}/books/{id}"),
        volume_info: VolumeInfo {
            title: item.title,
            authors,
            published_date: Some(PUBLISHED_DATE.to_string()),
            description: Some(DESCRIPTION.to_string()),
            image_links: Some(ImageLinks {
                thumbnail,
                ..Default::default()
            }),
            categories: item.subjects,
            language: item.languages.into_iter().next(),
            preview_link,
            info_link: Some(format!("https://www.gutenberg.org/ebooks/{id}")),
            ..Default::default()
        },
        access_info: AccessInfo {
            country: "US".to_string(),
            viewability: "ALL_PAGES".to_string(),
            embeddable: true,
            public_domain: true,
            text_to_speech_permission: String::new(),
            epub: FormatAvailability {
                is_available: epub.is_some(),
                acs_token_link: None,
                download_link: epub,
            },
            pdf: FormatAvailability {
                is_available: pdf.is_some(),
                acs_token_link: None,
                download_link: pdf,
            },
            web_reader_link: html,
            access_view_status: "FULL_PUBLIC_DOMAIN".to_string(),
        },
    }
}
