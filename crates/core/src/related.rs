//! Derive a "more like this" query from a seed book.

use crate::book::Book;

/// Page size for related-book lookups.
pub const RELATED_PAGE_SIZE: u32 = 6;

/// Google Books query for books related to `book`.
///
/// The first category wins over the first author. `None` means there is
/// nothing to search for.
pub fn related_query(book: &Book) -> Option<String> {
    if let Some(category) = book.first_category() {
        return Some(format!("subject:{category}"));
    }
    book.first_author().map(|author| format!("inauthor:{author}"))
}

/// Remove the seed book from its own related list.
pub fn exclude_seed(books: Vec<Book>, seed_id: &str) -> Vec<Book> {
    books.into_iter().filter(|b| b.id != seed_id).collect()
}
