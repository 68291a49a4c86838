//! Core types shared across the crate: entries, import reports, and
//! coverage statistics, plus the placeholder formatting helper.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
};

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"\{(\d+)\}").unwrap();
}

/// One translatable string: a stable key plus its text per language code.
///
/// The language codes are the sheet's column names (e.g. `ru`, `en`). An
/// empty text means the translation is missing for that language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entry {
    /// Unique key within one table. Non-empty.
    pub key: String,

    /// Map from language code to translated text.
    #[serde(default)]
    pub texts: BTreeMap<String, String>,
}

impl Entry {
    /// Creates an entry from a key and `(language, text)` pairs.
    pub fn new(
        key: impl Into<String>,
        texts: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Entry {
            key: key.into(),
            texts: texts.into_iter().collect(),
        }
    }

    /// Returns the text for `language`, tolerating region subtags: a request
    /// for `en-US` resolves an `en` column when no exact match exists.
    pub fn text(&self, language: &str) -> Option<&str> {
        if let Some(value) = self.texts.get(language) {
            return Some(value.as_str());
        }
        self.texts
            .iter()
            .find(|(code, _)| lang_matches(code, language))
            .map(|(_, value)| value.as_str())
    }

    /// Sets (or adds) the text for a language.
    pub fn set_text(&mut self, language: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(language.into(), text.into());
    }

    /// True when every listed language has non-empty text.
    pub fn is_complete(&self, languages: &[String]) -> bool {
        languages
            .iter()
            .all(|lang| self.text(lang).is_some_and(|t| !t.is_empty()))
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Entry {{ key: {}, languages: [{}] }}",
            self.key,
            self.texts
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

/// Outcome counters for one successful sheet import.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportReport {
    /// Number of entries written to the table.
    pub imported: usize,

    /// Keys whose second and later occurrences were dropped (first wins).
    #[serde(skip_serializing_if = "BTreeSet::is_empty", default)]
    pub skipped_duplicates: BTreeSet<String>,
}

/// Terminal state of one import attempt. Errors never cross the import
/// pipeline boundary as `Err`; they surface here as `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    /// The table was fully replaced.
    Completed(ImportReport),

    /// The caller cancelled before the table was touched.
    Cancelled,

    /// Fetch, parse, or load failed; the table was left untouched.
    Failed(String),
}

impl ImportStatus {
    /// The failure message, if this import failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            ImportStatus::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// The report, if this import completed.
    pub fn report(&self) -> Option<&ImportReport> {
        match self {
            ImportStatus::Completed(report) => Some(report),
            _ => None,
        }
    }
}

impl Display for ImportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportStatus::Completed(report) => {
                write!(f, "imported {} entries", report.imported)?;
                if !report.skipped_duplicates.is_empty() {
                    write!(
                        f,
                        " (skipped {} duplicate keys)",
                        report.skipped_duplicates.len()
                    )?;
                }
                Ok(())
            }
            ImportStatus::Cancelled => write!(f, "import cancelled"),
            ImportStatus::Failed(message) => write!(f, "import failed: {}", message),
        }
    }
}

/// Coverage statistics for a translation table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableStats {
    /// Total number of entries.
    pub total: usize,

    /// Entries with non-empty text in every table language.
    pub complete: usize,

    /// Per-language count of entries with empty or absent text.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub missing: BTreeMap<String, usize>,
}

/// Substitutes `{0}`, `{1}`, … placeholders with positional arguments.
///
/// Placeholders without a matching argument are left verbatim, so a
/// mis-translated template degrades visibly instead of panicking.
pub fn format_text(template: &str, args: &[&str]) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| args.get(index))
                .map_or_else(|| caps[0].to_string(), |value| (*value).to_string())
        })
        .into_owned()
}

pub(crate) fn normalize_lang(lang: &str) -> String {
    lang.trim().replace('_', "-").to_ascii_lowercase()
}

pub(crate) fn lang_base(lang: &str) -> &str {
    lang.split('-').next().unwrap_or(lang)
}

/// Language-code match tolerant of case, `_`/`-`, and region subtags.
pub(crate) fn lang_matches(column_lang: &str, requested_lang: &str) -> bool {
    let column = normalize_lang(column_lang);
    let requested = normalize_lang(requested_lang);
    column == requested || lang_base(&column) == lang_base(&requested)
}
