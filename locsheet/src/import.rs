//! The fetch → parse → load pipeline that refreshes a table from an
//! external CSV source, with cooperative cancellation.

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use tracing::info;

use crate::{error::Error, sheet, table::TranslationTable, types::ImportStatus};

/// Cooperative cancellation flag shared between the caller and an in-flight
/// import. Cloning yields a handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Source capability for the import pipeline: anything that can produce the
/// raw sheet text (HTTP, disk, a test double).
///
/// Implementations report transport failures as [`Error::Fetch`] and honor
/// the token between polling steps, returning [`Error::Cancelled`].
pub trait Fetcher {
    fn fetch(&self, cancel: &CancellationToken) -> Result<String, Error>;
}

/// Reads the sheet from a local file, decoding through a BOM-aware reader
/// so UTF-16 exports from spreadsheet tools still import cleanly.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileFetcher {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Fetcher for FileFetcher {
    fn fetch(&self, cancel: &CancellationToken) -> Result<String, Error> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let file = File::open(&self.path)
            .map_err(|e| Error::fetch_error(format!("{}: {}", self.path.display(), e)))?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);
        let mut decoded = String::new();
        decoder
            .read_to_string(&mut decoded)
            .map_err(|e| Error::fetch_error(e.to_string()))?;
        Ok(decoded)
    }
}

/// Fetches the sheet and atomically replaces the table content.
///
/// Never returns an error: every outcome is an [`ImportStatus`], and on
/// anything but `Completed` the table keeps its prior state. When
/// `delimiter` is `None` it is sniffed from the sheet header.
pub fn import_table(
    table: &mut TranslationTable,
    fetcher: &dyn Fetcher,
    delimiter: Option<char>,
    cancel: &CancellationToken,
) -> ImportStatus {
    if cancel.is_cancelled() {
        return ImportStatus::Cancelled;
    }

    let text = match fetcher.fetch(cancel) {
        Ok(text) => text,
        Err(Error::Cancelled) => return ImportStatus::Cancelled,
        Err(e) => return ImportStatus::Failed(e.to_string()),
    };
    if cancel.is_cancelled() {
        return ImportStatus::Cancelled;
    }
    if text.is_empty() {
        return ImportStatus::Failed(Error::EmptyContent.to_string());
    }

    let rows = match sheet::parse(&text, delimiter) {
        Ok(rows) => rows,
        Err(e) => return ImportStatus::Failed(e.to_string()),
    };
    match table.load(&rows) {
        Ok(report) => {
            info!(
                imported = report.imported,
                skipped_duplicates = report.skipped_duplicates.len(),
                "sheet import completed"
            );
            ImportStatus::Completed(report)
        }
        Err(e) => ImportStatus::Failed(e.to_string()),
    }
}
