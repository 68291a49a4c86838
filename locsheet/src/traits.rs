//! Persistence trait for reading and writing a table from/to JSON.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::{error::Error, table::TranslationTable};

/// Reading and writing the persisted table shape: entries plus
/// `default_language` and the source `url`.
///
/// # Example
///
/// ```rust,no_run
/// use locsheet::{Persist, TranslationTable};
/// let table = TranslationTable::read_from("Localization.json")?;
/// table.write_to("Localization_copy.json")?;
/// Ok::<(), locsheet::Error>(())
/// ```
pub trait Persist {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        self.to_writer(BufWriter::new(file))
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}

impl Persist for TranslationTable {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Json)
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, self).map_err(Error::Json)?;
        writer.write_all(b"\n").map_err(Error::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet;

    #[test]
    fn test_table_json_round_trip() {
        let mut table = TranslationTable::new("en").with_url("https://example.test/sheet.csv");
        table
            .load(&sheet::parse("Key,ru,en\ngreeting,Привет,Hello\n", None).unwrap())
            .unwrap();

        let mut buffer = Vec::new();
        table.to_writer(&mut buffer).unwrap();
        let reloaded = TranslationTable::from_reader(Cursor::new(buffer)).unwrap();

        assert_eq!(reloaded, table);
        assert_eq!(reloaded.url, "https://example.test/sheet.csv");
        assert_eq!(reloaded.default_language, "en");
        assert_eq!(reloaded.get_text("greeting", "ru", "en"), "Привет");
    }

    #[test]
    fn test_write_to_and_read_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");

        let mut table = TranslationTable::new("en");
        table
            .load(&sheet::parse("Key,ru,en\nk,а,a\n", None).unwrap())
            .unwrap();
        table.write_to(&path).unwrap();

        let reloaded = TranslationTable::read_from(&path).unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn test_from_str_rejects_malformed_json() {
        assert!(matches!(
            TranslationTable::from_str("{ not json"),
            Err(Error::Json(_))
        ));
    }
}
