//! The [`Library`] collection and its list transformations.
//!
//! Every query returns a new `Library` holding the matching subsequence, in
//! the original insertion order. Mutations work in place; persisting them is
//! the store's job.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::book::Book;
use crate::query::{SearchField, Statistics};

/// Ordered collection of books.
///
/// Serializes as a bare JSON array of book objects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }

    /// Append a book at the end.
    pub fn push(&mut self, book: Book) {
        self.books.push(book);
    }

    // ---------------------------------------------------------------
    // Title-keyed mutations
    // ---------------------------------------------------------------

    /// Remove every book whose title matches case-insensitively.
    ///
    /// Returns the number of books removed.
    pub fn remove_all_by_title(&mut self, title: &str) -> usize {
        let before = self.books.len();
        self.books.retain(|book| !book.title_matches(title));
        before - self.books.len()
    }

    /// Flip the read flag of the first book whose title matches
    /// case-insensitively. Later duplicates are left alone.
    ///
    /// Returns the new read state, or `None` if no book matched.
    pub fn toggle_first_by_title(&mut self, title: &str) -> Option<bool> {
        let book = self.books.iter_mut().find(|book| book.title_matches(title))?;
        book.read = !book.read;
        Some(book.read)
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    /// Books whose `field` contains `keyword` as a case-insensitive substring.
    ///
    /// An empty keyword matches every book.
    pub fn search(&self, keyword: &str, field: SearchField) -> Library {
        let needle = keyword.to_lowercase();
        self.books
            .iter()
            .filter(|book| field.value_of(book).to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Books whose genre equals `genre`, ignoring case.
    pub fn filter_by_genre(&self, genre: &str) -> Library {
        let wanted = genre.to_lowercase();
        self.books
            .iter()
            .filter(|book| book.genre.to_lowercase() == wanted)
            .cloned()
            .collect()
    }

    /// Distinct genres present in the library, sorted.
    pub fn genres(&self) -> Vec<String> {
        self.books
            .iter()
            .map(|book| book.genre.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::from_books(&self.books)
    }
}

impl From<Vec<Book>> for Library {
    fn from(books: Vec<Book>) -> Self {
        Self { books }
    }
}

impl FromIterator<Book> for Library {
    fn from_iter<I: IntoIterator<Item = Book>>(iter: I) -> Self {
        Self {
            books: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Library {
    type Item = Book;
    type IntoIter = std::vec::IntoIter<Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.into_iter()
    }
}

impl<'a> IntoIterator for &'a Library {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}
