//! Command implementations for the `locsheet` binary.
//!
//! Each `run_*` function is the body of one subcommand, returning a user
//! displayable error string so the binary owns all process-exit policy.

pub mod edit;
pub mod http;
pub mod import;
pub mod lang;
pub mod settings;
pub mod stats;
pub mod view;

use std::path::Path;

use locsheet::{Persist, TranslationTable};

pub use crate::{
    edit::{run_edit_remove_command, run_edit_rename_command, run_edit_set_command},
    http::HttpFetcher,
    import::{run_export_command, run_import_command},
    lang::{run_lang_command, LangAction},
    settings::FileLanguageStore,
    stats::run_stats_command,
    view::run_view_command,
};

/// Loads a table JSON file, with a CLI-friendly error message.
pub fn load_table(path: &str) -> Result<TranslationTable, String> {
    TranslationTable::read_from(path).map_err(|e| format!("cannot read table {}: {}", path, e))
}

/// Writes a table back to its JSON file.
pub fn save_table(table: &TranslationTable, path: &str) -> Result<(), String> {
    table
        .write_to(path)
        .map_err(|e| format!("cannot write table {}: {}", path, e))
}

/// Loads the table when the file exists, otherwise starts an empty one so
/// a first `import` can create it.
pub fn load_or_new_table(path: &str, default_language: &str) -> Result<TranslationTable, String> {
    if Path::new(path).exists() {
        load_table(path)
    } else {
        Ok(TranslationTable::new(default_language))
    }
}
