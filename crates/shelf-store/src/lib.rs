//! Book storage for Shelf.
//!
//! This crate keeps the in-memory [`Library`](shelf_types::Library) and its
//! durable mirror in step. A presentation adapter opens a [`Catalog`] once per
//! session and calls its operations; every mutating call rewrites the whole
//! backing file before it returns.
//!
//! # Storage Backends
//!
//! All backends implement the [`LibraryStore`] trait:
//!
//! - [`JsonFileStore`] -- a single pretty-printed JSON file (the default `library.json`)
//! - [`InMemoryStore`] -- a lock-protected value for tests and embedding
//!
//! # Design Rules
//!
//! 1. Loading never fails: a missing file or unparsable content yields an empty library.
//! 2. A corrupt file is reported as [`LoadStatus::Corrupt`] and logged, never deleted.
//! 3. Saving replaces the whole file in one rename; write errors are propagated.
//! 4. A mutation only reaches memory after it has been saved.
//! 5. There is no locking between processes: the last writer wins.

pub mod catalog;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use catalog::Catalog;
pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::InMemoryStore;
pub use traits::{LibraryStore, LoadReport, LoadStatus};
