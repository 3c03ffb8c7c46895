use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("publication year {0} is outside {min}..={max}", min = crate::MIN_YEAR, max = crate::MAX_YEAR)]
    YearOutOfRange(i32),

    #[error("unknown search field: {0} (expected title or author)")]
    UnknownSearchField(String),
}
