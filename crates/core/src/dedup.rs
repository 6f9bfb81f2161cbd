//! Title-based duplicate removal for merged search results.
//!
//! The key is the trimmed, lowercased title. Distinct works that share a title
//! collapse into one, and near-duplicates with small spelling differences are
//! kept apart.

use std::collections::HashSet;

use crate::book::Book;

/// Keep the first book for each title key; drop books without a title.
pub fn dedup_by_title(books: Vec<Book>) -> Vec<Book> {
    let mut seen = HashSet::new();
    books
        .into_iter()
        .filter(|book| match book.title_key() {
            Some(key) => seen.insert(key),
            None => false,
        })
        .collect()
}
