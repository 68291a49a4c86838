//! All error types for the locsheet crate.
//!
//! Returned from fallible operations (sheet parsing, table mutation,
//! persistence). Lookup-time missing translations are deliberately not
//! errors; see [`crate::table::TranslationTable::get_text`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("sheet must contain a header row and at least one data row (found {0})")]
    TooFewRows(usize),

    #[error("sheet header must contain a key column and at least two language columns (found {0})")]
    TooFewColumns(usize),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("empty content")]
    EmptyContent,

    #[error("import cancelled")]
    Cancelled,

    #[error("duplicate key `{0}`")]
    DuplicateKey(String),

    #[error("key not found: `{0}`")]
    KeyNotFound(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("unsupported language `{0}`")]
    UnsupportedLanguage(String),

    #[error("invalid language set: {0}")]
    InvalidLanguages(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write error: {0}")]
    CsvWrite(#[from] csv::Error),
}

impl Error {
    /// Creates a fetch error from any transport failure.
    pub fn fetch_error(reason: impl Into<String>) -> Self {
        Error::Fetch(reason.into())
    }
}
