//! The `import` and `export` subcommands.

use std::fs;

use locsheet::{import_table, CancellationToken, Fetcher, FileFetcher, ImportStatus};

use crate::{http::HttpFetcher, load_or_new_table, load_table, save_table};

/// Imports a sheet into the table file, creating it on first use.
///
/// The source is `--file`, then `--url`, then the URL remembered in the
/// table itself. A passed URL is stored in the table so later imports need
/// no arguments.
pub fn run_import_command(
    table_path: String,
    url: Option<String>,
    file: Option<String>,
    delimiter: Option<char>,
    default_language: String,
) -> Result<(), String> {
    let mut table = load_or_new_table(&table_path, &default_language)?;
    if let Some(url) = url {
        table.url = url;
    }

    let fetcher: Box<dyn Fetcher> = match file {
        Some(path) => Box::new(FileFetcher::new(path)),
        None if !table.url.is_empty() => Box::new(HttpFetcher::new(table.url.clone())),
        None => return Err("no sheet source: pass --url or --file".to_string()),
    };

    let status = import_table(&mut table, fetcher.as_ref(), delimiter, &CancellationToken::new());
    match status {
        ImportStatus::Completed(_) => {
            save_table(&table, &table_path)?;
            println!("{}", status);
            Ok(())
        }
        ImportStatus::Cancelled | ImportStatus::Failed(_) => Err(status.to_string()),
    }
}

/// Writes the table back out as a CSV sheet, to a file or stdout.
pub fn run_export_command(table_path: String, output: Option<String>) -> Result<(), String> {
    let table = load_table(&table_path)?;
    let csv = table
        .to_csv_string()
        .map_err(|e| format!("export failed: {}", e))?;
    match output {
        Some(path) => {
            fs::write(&path, csv).map_err(|e| format!("cannot write {}: {}", path, e))?;
            println!("exported {} entries to {}", table.len(), path);
        }
        None => print!("{}", csv),
    }
    Ok(())
}
