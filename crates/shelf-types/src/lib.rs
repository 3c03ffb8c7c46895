//! Foundation types for Shelf, a personal book catalog.
//!
//! This crate provides the record and collection types used throughout the
//! workspace. Every other Shelf crate depends on `shelf-types`.
//!
//! # Key Types
//!
//! - [`Book`]: A single catalog record (title, author, year, genre, read flag)
//! - [`Library`]: Ordered collection of books with its query and mutation functions
//! - [`BookDraft`]: Unvalidated form input, checked by presentation adapters
//! - [`SearchField`]: Which text field a keyword search looks at
//! - [`Statistics`]: Total count and read percentage
//!
//! # Title Matching
//!
//! Titles are matched case-insensitively but are not a key: duplicates are
//! allowed. [`Library::remove_all_by_title`] affects every match while
//! [`Library::toggle_first_by_title`] affects only the first one.

pub mod book;
pub mod error;
pub mod library;
pub mod query;

pub use book::{Book, BookDraft, DEFAULT_YEAR, MAX_YEAR, MIN_YEAR, SUGGESTED_GENRES};
pub use error::TypeError;
pub use library::Library;
pub use query::{SearchField, Statistics};
