//! The in-memory translation table: sheet loading, multi-language lookup
//! with fallback, entry editing, and coverage statistics.

use std::{
    collections::{BTreeSet, HashMap},
    io::Write,
    sync::OnceLock,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::Error,
    types::{Entry, ImportReport, TableStats},
};

/// A flat key → per-language text table.
///
/// Entries keep their sheet order for listing and export; lookups go through
/// a lazily built key index. The index is a cache: every mutation
/// invalidates it and the next lookup rebuilds it, so it never holds stale
/// keys.
///
/// The table is not designed for concurrent mutation. Share it read-only, or
/// serialize writers externally.
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslationTable {
    /// Source sheet URL, kept with the table so re-imports need no extra
    /// configuration.
    #[serde(default)]
    pub url: String,

    /// Fallback language for [`TranslationTable::text`].
    pub default_language: String,

    /// Language columns in sheet order.
    #[serde(default)]
    pub languages: Vec<String>,

    entries: Vec<Entry>,

    #[serde(skip)]
    index: OnceLock<HashMap<String, usize>>,
}

impl Clone for TranslationTable {
    fn clone(&self) -> Self {
        TranslationTable {
            url: self.url.clone(),
            default_language: self.default_language.clone(),
            languages: self.languages.clone(),
            entries: self.entries.clone(),
            index: OnceLock::new(),
        }
    }
}

impl PartialEq for TranslationTable {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
            && self.default_language == other.default_language
            && self.languages == other.languages
            && self.entries == other.entries
    }
}

impl TranslationTable {
    /// Creates an empty table. Languages are filled in by the first
    /// [`TranslationTable::load`] from a sheet header.
    pub fn new(default_language: impl Into<String>) -> Self {
        TranslationTable {
            url: String::new(),
            default_language: default_language.into(),
            languages: Vec::new(),
            entries: Vec::new(),
            index: OnceLock::new(),
        }
    }

    /// Sets the source sheet URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// All entries in sheet order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterator over all keys in sheet order.
    pub fn all_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    /// Replaces the table content from parsed sheet rows.
    ///
    /// Row 0 is the header: the key column followed by language columns in
    /// order. Each data row with at least three fields becomes an entry;
    /// rows with an empty key are skipped without being counted, and
    /// duplicate keys keep their first occurrence, with later ones recorded
    /// in the report. The entry and language lists are only replaced after
    /// the full scan, so a failed load leaves prior state untouched.
    pub fn load(&mut self, rows: &[Vec<String>]) -> Result<ImportReport, Error> {
        if rows.len() < 2 {
            return Err(Error::TooFewRows(rows.len()));
        }
        let header = &rows[0];
        if header.len() < 3 {
            return Err(Error::TooFewColumns(header.len()));
        }
        let languages: Vec<String> = header[1..]
            .iter()
            .map(|column| column.trim().to_string())
            .collect();

        let mut entries = Vec::with_capacity(rows.len() - 1);
        let mut seen = BTreeSet::new();
        let mut report = ImportReport::default();
        for row in &rows[1..] {
            if row.len() < 3 {
                continue;
            }
            let key = row[0].trim();
            if key.is_empty() {
                continue;
            }
            if !seen.insert(key.to_string()) {
                report.skipped_duplicates.insert(key.to_string());
                continue;
            }
            let texts = languages.iter().zip(row[1..].iter()).map(|(lang, value)| {
                (lang.clone(), value.trim().to_string())
            });
            entries.push(Entry::new(key, texts));
            report.imported += 1;
        }

        self.languages = languages;
        self.entries = entries;
        self.invalidate();
        Ok(report)
    }

    /// Looks up `key` in `language`, falling back to `fallback_language`
    /// when the requested column is empty or absent.
    ///
    /// A completely unknown key returns the key itself as a visible
    /// placeholder and logs a warning; lookups never fail.
    pub fn get_text(&self, key: &str, language: &str, fallback_language: &str) -> String {
        let Some(entry) = self.get(key) else {
            warn!(key, "localization key not found");
            return key.to_string();
        };
        if let Some(text) = entry.text(language).filter(|t| !t.is_empty()) {
            return text.to_string();
        }
        debug!(key, language, fallback_language, "missing translation, using fallback");
        entry
            .text(fallback_language)
            .unwrap_or_default()
            .to_string()
    }

    /// Looks up `key` in `language` with the table's default language as
    /// fallback.
    pub fn text(&self, key: &str, language: &str) -> String {
        let fallback = self.default_language.clone();
        self.get_text(key, language, &fallback)
    }

    /// O(1) key membership via the index, rebuilding it if stale.
    pub fn has_key(&self, key: &str) -> bool {
        self.index().contains_key(key)
    }

    /// Returns the entry for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.index().get(key).map(|&position| &self.entries[position])
    }

    /// Inserts a new entry or replaces the texts of an existing one,
    /// keeping its position.
    pub fn upsert(&mut self, entry: Entry) -> Result<(), Error> {
        if entry.key.trim().is_empty() {
            return Err(Error::InvalidKey("key must be non-empty".to_string()));
        }
        match self.position_of(&entry.key) {
            Some(position) => self.entries[position] = entry,
            None => self.entries.push(entry),
        }
        self.invalidate();
        Ok(())
    }

    /// Removes the entry for `key`, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let position = self.position_of(key)?;
        let entry = self.entries.remove(position);
        self.invalidate();
        Some(entry)
    }

    /// Renames a key in place, re-indexing the table.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] when `new_key` already names another entry,
    /// [`Error::KeyNotFound`] when `old_key` is absent, and
    /// [`Error::InvalidKey`] for an empty `new_key`.
    pub fn rename(&mut self, old_key: &str, new_key: &str) -> Result<(), Error> {
        if new_key.trim().is_empty() {
            return Err(Error::InvalidKey("key must be non-empty".to_string()));
        }
        if old_key == new_key {
            return Ok(());
        }
        if self.has_key(new_key) {
            return Err(Error::DuplicateKey(new_key.to_string()));
        }
        let position = self
            .position_of(old_key)
            .ok_or_else(|| Error::KeyNotFound(old_key.to_string()))?;
        self.entries[position].key = new_key.to_string();
        self.invalidate();
        Ok(())
    }

    /// Case-insensitive substring search over keys and all language texts.
    pub fn search(&self, filter: &str) -> Vec<&Entry> {
        if filter.is_empty() {
            return self.entries.iter().collect();
        }
        let filter = filter.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                entry.key.to_lowercase().contains(&filter)
                    || entry
                        .texts
                        .values()
                        .any(|text| text.to_lowercase().contains(&filter))
            })
            .collect()
    }

    /// Coverage statistics over the table's language columns.
    pub fn stats(&self) -> TableStats {
        let mut stats = TableStats {
            total: self.entries.len(),
            ..TableStats::default()
        };
        for language in &self.languages {
            stats.missing.insert(language.clone(), 0);
        }
        for entry in &self.entries {
            if entry.is_complete(&self.languages) {
                stats.complete += 1;
            }
            for language in &self.languages {
                if entry.text(language).is_none_or(str::is_empty) {
                    if let Some(count) = stats.missing.get_mut(language) {
                        *count += 1;
                    }
                }
            }
        }
        stats
    }

    /// Writes the table as a comma-delimited sheet: `key` plus the language
    /// columns, one row per entry.
    pub fn to_csv_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new().from_writer(writer);
        let mut header = vec!["key".to_string()];
        header.extend(self.languages.iter().cloned());
        wtr.write_record(&header)?;
        for entry in &self.entries {
            let mut record = vec![entry.key.clone()];
            for language in &self.languages {
                record.push(entry.text(language).unwrap_or_default().to_string());
            }
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Renders the CSV export to a string.
    pub fn to_csv_string(&self) -> Result<String, Error> {
        let mut buffer = Vec::new();
        self.to_csv_writer(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    fn index(&self) -> &HashMap<String, usize> {
        self.index.get_or_init(|| {
            self.entries
                .iter()
                .enumerate()
                .map(|(position, entry)| (entry.key.clone(), position))
                .collect()
        })
    }

    fn position_of(&self, key: &str) -> Option<usize> {
        self.index().get(key).copied()
    }

    fn invalidate(&mut self) {
        self.index = OnceLock::new();
    }
}
