use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::book::Book;
use crate::error::TypeError;

/// Text field searched by a keyword query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    Title,
    Author,
}

impl SearchField {
    /// The field's value on the given book.
    pub fn value_of<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            Self::Title => &book.title,
            Self::Author => &book.author,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            other => Err(TypeError::UnknownSearchField(other.to_string())),
        }
    }
}

/// Summary counts over a library.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of books in the library.
    pub total: usize,
    /// Number of books marked read.
    pub read: usize,
    /// `100 * read / total`, or `0.0` for an empty library.
    pub percent_read: f64,
}

impl Statistics {
    /// Compute statistics over a sequence of books.
    pub fn from_books<'a>(books: impl IntoIterator<Item = &'a Book>) -> Self {
        let (total, read) = books
            .into_iter()
            .fold((0usize, 0usize), |(total, read), book| {
                (total + 1, read + usize::from(book.read))
            });
        let percent_read = if total == 0 {
            0.0
        } else {
            100.0 * read as f64 / total as f64
        };
        Self {
            total,
            read,
            percent_read,
        }
    }

    /// Read fraction in `0.0..=1.0`, for progress bars.
    pub fn read_fraction(&self) -> f64 {
        self.percent_read / 100.0
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} books, {:.2}% read", self.total, self.percent_read)
    }
}
