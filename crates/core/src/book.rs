//! Unified book record shared by every catalog provider.
//!
//! Field names follow the Google Books volume schema (camelCase on the wire),
//! which lets provider A pass most of its payload straight through and keeps a
//! favorited [`Book`] byte-compatible when it is written back to disk.

use serde::{Deserialize, Serialize};

/// Author list used when a provider supplies no authors at all.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// A single book as returned by the aggregation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Provider-namespaced identifier (native for Google Books, `gutendex-<n>` for Gutendex).
    pub id: String,
    #[serde(default)]
    pub etag: String,
    #[serde(default)]
    pub self_link: String,
    pub volume_info: VolumeInfo,
    #[serde(default)]
    pub access_info: AccessInfo,
}

impl Book {
    /// Title key used for deduplication, or `None` when the title is blank.
    pub fn title_key(&self) -> Option<String> {
        let key = self.volume_info.title.trim().to_lowercase();
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }

    pub fn first_category(&self) -> Option<&str> {
        self.volume_info
            .categories
            .first()
            .map(String::as_str)
            .filter(|c| !c.is_empty())
    }

    pub fn first_author(&self) -> Option<&str> {
        self.volume_info
            .authors
            .first()
            .map(String::as_str)
            .filter(|a| !a.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Never empty once a provider adapter has normalized the record.
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_links: Option<ImageLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_volume_link: Option<String>,
}

/// Cover image variants; any subset may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_large: Option<String>,
}

/// How much of a work a reader can access, and in which formats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessInfo {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub viewability: String,
    #[serde(default)]
    pub embeddable: bool,
    #[serde(default)]
    pub public_domain: bool,
    #[serde(default)]
    pub text_to_speech_permission: String,
    #[serde(default)]
    pub epub: FormatAvailability,
    #[serde(default)]
    pub pdf: FormatAvailability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_reader_link: Option<String>,
    #[serde(default)]
    pub access_view_status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatAvailability {
    #[serde(default)]
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acs_token_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_link: Option<String>,
}
