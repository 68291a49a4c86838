#![forbid(unsafe_code)]
//! Localization table toolkit: CSV sheet import and multi-language lookup.
//!
//! A translation sheet (typically a published spreadsheet exported as CSV)
//! is imported into a flat key → per-language table with fallback-aware
//! lookup, a language selector with change notification, and coverage
//! statistics for auditing a translation set.
//!
//! # Quick Start
//!
//! ```rust
//! use locsheet::{import_table, CancellationToken, Fetcher, TranslationTable};
//!
//! struct InlineSheet;
//! impl Fetcher for InlineSheet {
//!     fn fetch(&self, _cancel: &CancellationToken) -> Result<String, locsheet::Error> {
//!         Ok("Key,ru,en\ngreeting,Привет,Hello\n".to_string())
//!     }
//! }
//!
//! let mut table = TranslationTable::new("en");
//! let status = import_table(&mut table, &InlineSheet, None, &CancellationToken::new());
//! assert!(status.report().is_some());
//! assert_eq!(table.get_text("greeting", "ru", "en"), "Привет");
//! // Missing keys degrade to a visible placeholder instead of failing.
//! assert_eq!(table.get_text("missing", "ru", "en"), "missing");
//! ```
//!
//! # Design
//!
//! - Imports are all-or-nothing: a fetch or parse failure leaves the prior
//!   table untouched, and the outcome is always an [`ImportStatus`] value.
//! - Lookups never fail: missing translations fall back to the fallback
//!   language or the raw key, with a `tracing` diagnostic for auditing.
//! - Everything is synchronous and caller-driven; the only suspension point
//!   is the injected [`Fetcher`], which honors a cooperative
//!   [`CancellationToken`].

pub mod error;
pub mod import;
pub mod selector;
pub mod sheet;
pub mod table;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    import::{import_table, CancellationToken, Fetcher, FileFetcher},
    selector::{LanguageSelector, LanguageStore, MemoryStore, Subscription},
    table::TranslationTable,
    traits::Persist,
    types::{format_text, Entry, ImportReport, ImportStatus, TableStats},
};
