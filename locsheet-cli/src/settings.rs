//! JSON-file settings store for the language selector.

use std::{fs, path::PathBuf};

use locsheet::LanguageStore;
use serde_json::{json, Value};
use tracing::warn;

/// Persists the current language as `{"language": "…"}` in a small JSON
/// settings file. A missing or unreadable file just means "nothing saved
/// yet"; write failures are logged and otherwise ignored, matching the
/// fire-and-forget contract of the store seam.
#[derive(Debug, Clone)]
pub struct FileLanguageStore {
    path: PathBuf,
}

impl FileLanguageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileLanguageStore { path: path.into() }
    }
}

impl LanguageStore for FileLanguageStore {
    fn load_current(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let value: Value = serde_json::from_str(&raw).ok()?;
        value
            .get("language")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn save_current(&mut self, language: &str) {
        let body = json!({ "language": language });
        if let Err(e) = fs::write(&self.path, format!("{:#}\n", body)) {
            warn!(path = %self.path.display(), error = %e, "failed to save language setting");
        }
    }
}
