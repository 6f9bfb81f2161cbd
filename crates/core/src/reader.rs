//! Links for handing a book off to an external reader.

use crate::book::Book;

/// Web reader link if the provider gave one, otherwise the preview link.
pub fn reader_link(book: &Book) -> Option<&str> {
    non_empty(book.access_info.web_reader_link.as_deref())
        .or_else(|| non_empty(book.volume_info.preview_link.as_deref()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    Epub,
    Pdf,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DownloadLink<'a> {
    pub format: DownloadFormat,
    pub url: &'a str,
}

/// Downloadable formats, EPUB before PDF.
pub fn download_links(book: &Book) -> Vec<DownloadLink<'_>> {
    let access = &book.access_info;
    [(DownloadFormat::Epub, &access.epub), (DownloadFormat::Pdf, &access.pdf)]
        .into_iter()
        .filter(|(_, f)| f.is_available)
        .filter_map(|(format, f)| {
            non_empty(f.download_link.as_deref()).map(|url| DownloadLink { format, url })
        })
        .collect()
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
