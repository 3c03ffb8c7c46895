//! The [`Catalog`] session: the in-memory library plus its durable mirror.
//!
//! A presentation adapter opens one catalog at the start of a session and
//! owns it for the session's lifetime. Queries read the in-memory library.
//! Mutations apply to a copy, save the copy, and only then swap it in, so a
//! failed save leaves the session exactly as it was.

use shelf_types::{Book, Library, SearchField, Statistics};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::traits::{LibraryStore, LoadStatus};

/// A book catalog session.
pub struct Catalog {
    library: Library,
    store: Box<dyn LibraryStore>,
    load_status: LoadStatus,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("books", &self.library.len())
            .field("location", &self.store.location())
            .field("load_status", &self.load_status)
            .finish()
    }
}

impl Catalog {
    /// Open a session, loading the library from `store`.
    ///
    /// Never fails: unusable stored content starts the session empty, and
    /// [`Catalog::load_status`] says why.
    pub fn open(store: impl LibraryStore + 'static) -> Self {
        let report = store.load_report();
        info!(
            location = %store.location(),
            books = report.library.len(),
            status = %report.status,
            "catalog opened"
        );
        Self {
            library: report.library,
            store: Box::new(store),
            load_status: report.status,
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn books(&self) -> &[Book] {
        self.library.books()
    }

    pub fn len(&self) -> usize {
        self.library.len()
    }

    pub fn is_empty(&self) -> bool {
        self.library.is_empty()
    }

    /// How the library was obtained when the session opened.
    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn location(&self) -> String {
        self.store.location()
    }

    // ---------------------------------------------------------------
    // Mutations (each one persists before returning)
    // ---------------------------------------------------------------

    /// Append a book and persist. No validation happens here.
    pub fn add(&mut self, book: Book) -> StoreResult<()> {
        debug!(title = %book.title, "adding book");
        self.commit(|library| library.push(book))
    }

    /// Remove every book with a matching title and persist.
    ///
    /// Persists even when nothing matched. Returns the number removed.
    pub fn remove(&mut self, title: &str) -> StoreResult<usize> {
        let removed = self.commit(|library| library.remove_all_by_title(title))?;
        debug!(title, removed, "removed books");
        Ok(removed)
    }

    /// Flip the read flag of the first book with a matching title and persist.
    ///
    /// Persists even when nothing matched. Returns the new read state, or
    /// `None` if no book matched.
    pub fn toggle_read(&mut self, title: &str) -> StoreResult<Option<bool>> {
        let state = self.commit(|library| library.toggle_first_by_title(title))?;
        debug!(title, ?state, "toggled read status");
        Ok(state)
    }

    /// Replace the library with an empty one and persist. There is no undo.
    pub fn reset(&mut self) -> StoreResult<()> {
        let discarded = self.library.len();
        self.commit(|library| *library = Library::new())?;
        info!(discarded, "library reset");
        Ok(())
    }

    /// Apply `change` to a copy of the library, save it, then adopt it.
    fn commit<T>(&mut self, change: impl FnOnce(&mut Library) -> T) -> StoreResult<T> {
        let mut next = self.library.clone();
        let out = change(&mut next);
        self.store.save(&next)?;
        self.library = next;
        Ok(out)
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    /// Books whose `field` contains `keyword`, ignoring case.
    pub fn search(&self, keyword: &str, field: SearchField) -> Library {
        self.library.search(keyword, field)
    }

    /// Books whose genre equals `genre`, ignoring case.
    pub fn filter_by_genre(&self, genre: &str) -> Library {
        self.library.filter_by_genre(genre)
    }

    /// Distinct genres currently in the library, sorted.
    pub fn genres(&self) -> Vec<String> {
        self.library.genres()
    }

    pub fn statistics(&self) -> Statistics {
        self.library.statistics()
    }
}
