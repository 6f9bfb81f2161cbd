//! Pick a cover image URL for a book.

use crate::book::{Book, ImageLinks};

/// Returned when a record carries no usable image link.
pub const PLACEHOLDER_COVER: &str = "https://via.placeholder.com/300x450?text=No+Cover";

/// Largest available cover variant, upgraded to `https`.
///
/// Order is extra-large, large, medium, thumbnail, small-thumbnail. The
/// `small` variant is never chosen.
pub fn cover_url(links: Option<&ImageLinks>) -> String {
    let Some(links) = links else {
        return PLACEHOLDER_COVER.to_string();
    };
    [
        &links.extra_large,
        &links.large,
        &links.medium,
        &links.thumbnail,
        &links.small_thumbnail,
    ]
    .into_iter()
    .find_map(|u| u.as_deref().filter(|u| !u.is_empty()))
    .map(force_https)
    .unwrap_or_else(|| PLACEHOLDER_COVER.to_string())
}

/// Cover URL for a whole book.
pub fn book_cover(book: &Book) -> String {
    cover_url(book.volume_info.image_links.as_ref())
}

fn force_https(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    }
}
