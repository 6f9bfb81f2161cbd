//! Saved books, persisted as a JSON array of [`Book`] records.
//!
//! The file is read once when the store is opened and rewritten in full on
//! every change. Books are keyed by `id` and stored exactly as they were
//! received from the aggregator.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::book::Book;
use crate::error::FavoritesError;

pub const FAVORITES_FILE: &str = "saved_books_v3.json";

/// `<data_local_dir>/lumina/saved_books_v3.json`, or the bare file name when
/// the platform has no data directory.
pub fn default_favorites_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("lumina").join(FAVORITES_FILE))
        .unwrap_or_else(|| PathBuf::from(FAVORITES_FILE))
}

#[derive(Debug, Clone)]
pub struct FavoritesStore {
    path: PathBuf,
    books: Vec<Book>,
}

impl FavoritesStore {
    /// Open the store at `path`. A missing file is an empty list, and so is a
    /// file that does not parse (it gets overwritten on the next change).
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FavoritesError> {
        let path = path.as_ref().to_path_buf();
        let books = match std::fs::read(&path) {
            Ok(data) => match serde_json::from_slice::<Vec<Book>>(&data) {
                Ok(books) => books,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring unreadable favorites file");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                return Err(FavoritesError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        debug!(path = %path.display(), count = books.len(), "loaded favorites");
        Ok(Self { path, books })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Append `book` unless its id is already saved. Returns whether it was added.
    pub fn add(&mut self, book: Book) -> Result<bool, FavoritesError> {
        if self.contains(&book.id) {
            return Ok(false);
        }
        self.books.push(book);
        self.persist()?;
        Ok(true)
    }

    pub fn remove(&mut self, id: &str) -> Result<Book, FavoritesError> {
        let idx = self
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| FavoritesError::NotFound(id.to_string()))?;
        let removed = self.books.remove(idx);
        self.persist()?;
        Ok(removed)
    }

    /// Save `book` if absent, remove it if present. Returns whether it is saved afterwards.
    pub fn toggle(&mut self, book: Book) -> Result<bool, FavoritesError> {
        if self.contains(&book.id) {
            self.remove(&book.id)?;
            Ok(false)
        } else {
            self.add(book)
        }
    }

    fn persist(&self) -> Result<(), FavoritesError> {
        let write_err = |source| FavoritesError::Write {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let data = serde_json::to_vec(&self.books)?;
        std::fs::write(&self.path, data).map_err(write_err)?;
        Ok(())
    }
}
