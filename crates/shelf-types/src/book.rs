use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Earliest publication year accepted by the input forms.
pub const MIN_YEAR: i32 = 0;

/// Latest publication year accepted by the input forms.
pub const MAX_YEAR: i32 = 2100;

/// Year pre-filled on a blank add form.
pub const DEFAULT_YEAR: i32 = 2024;

/// Genres offered by the add form. The `genre` field is free text, so a
/// stored book may carry a genre outside this list.
pub const SUGGESTED_GENRES: [&str; 9] = [
    "Fiction",
    "Non-fiction",
    "Mystery",
    "Fantasy",
    "Science Fiction",
    "Biography",
    "History",
    "Self-help",
    "Other",
];

/// A single catalog record.
///
/// Field names match the on-disk JSON keys exactly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: String,
    pub read: bool,
}

impl Book {
    /// Create a new book record. No validation is performed.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: genre.into(),
            read,
        }
    }

    /// Case-insensitive title comparison.
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// Human-readable read marker.
    pub fn status_label(&self) -> &'static str {
        if self.read {
            "Read"
        } else {
            "Unread"
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({}) [{}] {}",
            self.title,
            self.author,
            self.year,
            self.genre,
            self.status_label()
        )
    }
}

/// Raw add-form input, before the required-field and range checks.
///
/// Presentation adapters build a draft from user input and call
/// [`BookDraft::validate`] before handing the result to the store, which
/// itself accepts any book.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub read: bool,
}

impl BookDraft {
    /// Check required fields and the year range, producing a [`Book`].
    ///
    /// Title and author must be non-blank. A missing year falls back to
    /// [`DEFAULT_YEAR`]; a blank genre becomes `"Other"`.
    pub fn validate(self) -> Result<Book, TypeError> {
        let title = self.title.trim();
        let author = self.author.trim();
        if title.is_empty() {
            return Err(TypeError::MissingField("title"));
        }
        if author.is_empty() {
            return Err(TypeError::MissingField("author"));
        }

        let year = self.year.unwrap_or(DEFAULT_YEAR);
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(TypeError::YearOutOfRange(year));
        }

        let genre = match self.genre.trim() {
            "" => "Other",
            g => g,
        };

        Ok(Book::new(title, author, year, genre, self.read))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, author: &str) -> BookDraft {
        BookDraft {
            title: title.into(),
            author: author.into(),
            year: Some(1954),
            genre: "Fantasy".into(),
            read: false,
        }
    }

    #[test]
    fn title_match_ignores_case() {
        let book = Book::new("The Hobbit", "Tolkien", 1937, "Fantasy", false);
        assert!(book.title_matches("the hobbit"));
        assert!(book.title_matches("THE HOBBIT"));
        assert!(!book.title_matches("Hobbit"));
    }

    #[test]
    fn display_includes_status() {
        let book = Book::new("Dune", "Herbert", 1965, "Science Fiction", true);
        assert_eq!(format!("{book}"), "Dune by Herbert (1965) [Science Fiction] Read");
    }

    #[test]
    fn serde_uses_plain_keys() {
        let book = Book::new("Dune", "Herbert", 1965, "Science Fiction", false);
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["title"], "Dune");
        assert_eq!(json["year"], 1965);
        assert_eq!(json["read"], false);
    }

    #[test]
    fn validate_accepts_complete_draft() {
        let book = draft("  The Lord of the Rings ", "Tolkien").validate().unwrap();
        assert_eq!(book.title, "The Lord of the Rings");
        assert_eq!(book.year, 1954);
    }

    #[test]
    fn validate_requires_title_and_author() {
        assert_eq!(draft("", "Tolkien").validate(), Err(TypeError::MissingField("title")));
        assert_eq!(draft("Dune", "   ").validate(), Err(TypeError::MissingField("author")));
    }

    #[test]
    fn validate_checks_year_range() {
        let mut d = draft("Dune", "Herbert");
        d.year = Some(2101);
        assert_eq!(d.validate(), Err(TypeError::YearOutOfRange(2101)));

        let mut d = draft("Dune", "Herbert");
        d.year = Some(-1);
        assert_eq!(d.validate(), Err(TypeError::YearOutOfRange(-1)));
    }

    #[test]
    fn validate_fills_defaults() {
        let mut d = draft("Dune", "Herbert");
        d.year = None;
        d.genre = String::new();
        let book = d.validate().unwrap();
        assert_eq!(book.year, DEFAULT_YEAR);
        assert_eq!(book.genre, "Other");
    }
}
