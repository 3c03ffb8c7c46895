use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use shelf_types::Library;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::LibraryStore;

/// Indentation used when writing the library file.
const INDENT: &[u8] = b"    ";

/// Library stored as one pretty-printed JSON array in a single file.
///
/// On-disk format:
/// ```text
/// [
///     {
///         "title": "Dune",
///         "author": "Frank Herbert",
///         "year": 1965,
///         "genre": "Science Fiction",
///         "read": false
///     }
/// ]
/// ```
///
/// Saves go to a temporary file in the same directory which is then renamed
/// over the target, so readers see either the old or the new library.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// File name used when no path is configured.
    pub const DEFAULT_FILE_NAME: &'static str = "library.json";

    /// Store backed by the file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the temporary file is created in.
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// Encode the library with the file's stable indentation.
    pub fn encode(library: &Library) -> StoreResult<Vec<u8>> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        library
            .serialize(&mut ser)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }
}

impl LibraryStore for JsonFileStore {
    fn read(&self) -> StoreResult<Option<Library>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }

    fn save(&self, library: &Library) -> StoreResult<()> {
        let data = Self::encode(library)?;
        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        // Keep the mode of the file being replaced.
        match fs::metadata(&self.path) {
            Ok(meta) => tmp.as_file().set_permissions(meta.permissions())?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        tmp.write_all(&data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %self.path.display(), books = library.len(), bytes = data.len(), "library saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::LoadStatus;
    use proptest::prelude::*;
    use shelf_types::Book;

    fn temp_store() -> (tempfile::TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("library.json"));
        (dir, store)
    }

    fn sample() -> Library {
        Library::from(vec![
            Book::new("The Lord of the Rings", "J. R. R. Tolkien", 1954, "Fantasy", true),
            Book::new("Dune", "Frank Herbert", 1965, "Science Fiction", false),
            Book::new("Dune", "Frank Herbert", 1965, "Science Fiction", true),
        ])
    }

    #[test]
    fn missing_file_loads_empty() {
        let (_dir, store) = temp_store();
        assert!(store.read().unwrap().is_none());

        let report = store.load_report();
        assert!(report.library.is_empty());
        assert_eq!(report.status, LoadStatus::Missing);
        assert!(!report.status.is_degraded());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let (_dir, store) = temp_store();
        store.save(&sample()).unwrap();
        assert_eq!(store.load(), sample());
        assert_eq!(store.load_report().status, LoadStatus::Loaded);
    }

    #[test]
    fn corrupt_file_loads_empty_and_is_kept() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), b"{ this is not json").unwrap();

        assert!(matches!(store.read(), Err(StoreError::Corrupt { .. })));
        let report = store.load_report();
        assert!(report.library.is_empty());
        assert!(matches!(report.status, LoadStatus::Corrupt(_)));
        assert!(report.status.is_degraded());

        // The bad content stays on disk until the next save.
        assert_eq!(fs::read(store.path()).unwrap(), b"{ this is not json");
    }

    #[test]
    fn wrong_shape_is_corrupt() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), br#"[{"title": "Dune"}]"#).unwrap();
        assert!(matches!(store.load_report().status, LoadStatus::Corrupt(_)));
    }

    #[test]
    fn directory_in_place_of_file_is_unreadable() {
        let (dir, _) = temp_store();
        let store = JsonFileStore::new(dir.path());
        let report = store.load_report();
        assert!(report.library.is_empty());
        assert!(matches!(report.status, LoadStatus::Unreadable(_)));
    }

    #[test]
    fn save_uses_four_space_indent() {
        let (_dir, store) = temp_store();
        store.save(&sample()).unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("[\n    {\n        \"title\": \"The Lord of the Rings\","));
    }

    #[test]
    fn save_empty_writes_empty_array() {
        let (_dir, store) = temp_store();
        store.save(&Library::new()).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[test]
    fn save_overwrites_previous_content() {
        let (_dir, store) = temp_store();
        store.save(&sample()).unwrap();
        store.save(&Library::new()).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("books.json"));
        store.save(&sample()).unwrap();
        assert_eq!(store.load(), sample());
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let (dir, store) = temp_store();
        store.save(&sample()).unwrap();
        store.save(&sample()).unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_existing_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, store) = temp_store();
        fs::write(store.path(), "[]").unwrap();
        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o644)).unwrap();

        store.save(&sample()).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
        assert_eq!(store.load(), sample());
    }

    #[test]
    fn reads_hand_written_file() {
        let (_dir, store) = temp_store();
        fs::write(
            store.path(),
            r#"[{"title": "Emma", "author": "Jane Austen", "year": 1815, "genre": "Fiction", "read": true}]"#,
        )
        .unwrap();
        let library = store.load();
        assert_eq!(library.books(), [Book::new("Emma", "Jane Austen", 1815, "Fiction", true)]);
    }

    fn arb_book() -> impl Strategy<Value = Book> {
        (".*", ".*", 0i32..=2100, ".*", any::<bool>())
            .prop_map(|(title, author, year, genre, read)| Book::new(title, author, year, genre, read))
    }

    proptest! {
        #[test]
        fn load_of_save_is_identity(books in proptest::collection::vec(arb_book(), 0..8)) {
            let (_dir, store) = temp_store();
            let library = Library::from(books);
            store.save(&library).unwrap();
            prop_assert_eq!(store.load(), library);
        }
    }
}
