//! The `stats` subcommand: coverage auditing for a translation table.

use crate::load_table;

pub fn run_stats_command(table_path: String, json_output: bool) -> Result<(), String> {
    let table = load_table(&table_path)?;
    let stats = table.stats();

    if json_output {
        let body = serde_json::to_string_pretty(&stats)
            .map_err(|e| format!("cannot encode stats: {}", e))?;
        println!("{}", body);
        return Ok(());
    }

    println!("=== Stats ===");
    println!("Entries: {}", stats.total);
    println!("Complete: {}", stats.complete);
    let percent = if stats.total == 0 {
        100.0
    } else {
        (stats.complete as f64) * 100.0 / (stats.total as f64)
    };
    println!("Coverage: {:.2}%", percent);
    println!("Missing per language:");
    for (language, count) in &stats.missing {
        println!("  {}: {}", language, count);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use locsheet::{Persist, TranslationTable};

    #[test]
    fn test_stats_runs_on_table_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        let mut table = TranslationTable::new("en");
        table
            .load(&locsheet::sheet::parse("Key,ru,en\nk,,b\nfull,a,b\n", None).unwrap())
            .unwrap();
        table.write_to(&path).unwrap();

        run_stats_command(path.to_string_lossy().to_string(), false).unwrap();
        run_stats_command(path.to_string_lossy().to_string(), true).unwrap();
    }

    #[test]
    fn test_stats_missing_table_is_an_error() {
        let error = run_stats_command("/no/such/table.json".to_string(), false).unwrap_err();
        assert!(error.contains("cannot read table"));
    }
}
