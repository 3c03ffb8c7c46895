use std::fmt;

use shelf_types::Library;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// How a library came out of [`LibraryStore::load_report`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    /// The stored content parsed cleanly.
    Loaded,
    /// Nothing was stored yet.
    Missing,
    /// Content was present but did not parse; it was discarded in memory.
    Corrupt(String),
    /// The backend could not be read at all.
    Unreadable(String),
}

impl LoadStatus {
    /// Returns `true` when the library was replaced by an empty one because
    /// the stored content could not be used.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Corrupt(_) | Self::Unreadable(_))
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded => write!(f, "loaded"),
            Self::Missing => write!(f, "missing"),
            Self::Corrupt(reason) => write!(f, "corrupt: {reason}"),
            Self::Unreadable(reason) => write!(f, "unreadable: {reason}"),
        }
    }
}

/// A loaded library together with how it was obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadReport {
    pub library: Library,
    pub status: LoadStatus,
}

/// Durable mirror of a [`Library`].
///
/// All implementations must satisfy these invariants:
/// - `save` replaces the whole stored library; there are no partial updates.
/// - A successful `save` followed by `read` returns an equal library, in order.
/// - `read` reports absence as `Ok(None)` and unparsable content as
///   [`StoreError::Corrupt`].
pub trait LibraryStore: Send + Sync {
    /// Read the stored library.
    ///
    /// Returns `Ok(None)` if nothing has been stored yet.
    fn read(&self) -> StoreResult<Option<Library>>;

    /// Serialize and store the full library, replacing what was there.
    fn save(&self, library: &Library) -> StoreResult<()>;

    /// Short description of where the library lives, for logs.
    fn location(&self) -> String;

    /// Load the library, degrading to an empty one on any read failure.
    ///
    /// The returned status tells a legitimately empty library apart from one
    /// whose stored content had to be discarded.
    fn load_report(&self) -> LoadReport {
        let (library, status) = match self.read() {
            Ok(Some(library)) => {
                debug!(location = %self.location(), books = library.len(), "library loaded");
                (library, LoadStatus::Loaded)
            }
            Ok(None) => {
                debug!(location = %self.location(), "no stored library, starting empty");
                (Library::new(), LoadStatus::Missing)
            }
            Err(StoreError::Corrupt { reason, .. }) => {
                warn!(location = %self.location(), %reason, "stored library is corrupt, starting empty");
                (Library::new(), LoadStatus::Corrupt(reason))
            }
            Err(e) => {
                warn!(location = %self.location(), error = %e, "stored library is unreadable, starting empty");
                (Library::new(), LoadStatus::Unreadable(e.to_string()))
            }
        };
        LoadReport { library, status }
    }

    /// Load the library, degrading to an empty one on any read failure.
    fn load(&self) -> Library {
        self.load_report().library
    }
}
