use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use shelf_types::Library;

use crate::error::{StoreError, StoreResult};
use crate::traits::LibraryStore;

/// In-memory library store.
///
/// Intended for tests and embedding. The stored library is held behind a
/// `RwLock` and cloned on read/write. A read-only store rejects every save,
/// which makes it useful for exercising write-failure paths.
pub struct InMemoryStore {
    stored: RwLock<Option<Library>>,
    read_only: bool,
    saves: AtomicUsize,
}

impl InMemoryStore {
    /// Create a store with nothing saved yet.
    pub fn new() -> Self {
        Self {
            stored: RwLock::new(None),
            read_only: false,
            saves: AtomicUsize::new(0),
        }
    }

    /// Create a store that already holds `library`.
    pub fn with_library(library: Library) -> Self {
        Self {
            stored: RwLock::new(Some(library)),
            ..Self::new()
        }
    }

    /// Create a store holding `library` that fails every save.
    pub fn read_only(library: Library) -> Self {
        Self {
            read_only: true,
            ..Self::with_library(library)
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Snapshot of the currently stored library, if any.
    pub fn stored(&self) -> Option<Library> {
        self.stored.read().expect("lock poisoned").clone()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryStore for InMemoryStore {
    fn read(&self) -> StoreResult<Option<Library>> {
        Ok(self.stored())
    }

    fn save(&self, library: &Library) -> StoreResult<()> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        *self.stored.write().expect("lock poisoned") = Some(library.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let books = self.stored().map(|lib| lib.len());
        f.debug_struct("InMemoryStore")
            .field("books", &books)
            .field("read_only", &self.read_only)
            .field("saves", &self.save_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::LoadStatus;
    use shelf_types::Book;

    #[test]
    fn empty_store_reports_missing() {
        let store = InMemoryStore::new();
        assert_eq!(store.load_report().status, LoadStatus::Missing);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn save_then_read() {
        let store = InMemoryStore::new();
        let lib = Library::from(vec![Book::new("Emma", "Jane Austen", 1815, "Fiction", false)]);
        store.save(&lib).unwrap();
        assert_eq!(store.read().unwrap(), Some(lib));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn read_only_rejects_save() {
        let store = InMemoryStore::read_only(Library::new());
        assert!(matches!(store.save(&Library::new()), Err(StoreError::ReadOnly)));
        assert_eq!(store.save_count(), 0);
        assert_eq!(store.load_report().status, LoadStatus::Loaded);
    }
}
