//! The `view` subcommand: list table entries with optional filtering.

use locsheet::TranslationTable;

use crate::load_table;

const TRUNCATE_AT: usize = 50;

pub fn run_view_command(
    table_path: String,
    lang: Option<String>,
    filter: Option<String>,
    full: bool,
) -> Result<(), String> {
    let table = load_table(&table_path)?;
    if let Some(lang) = &lang
        && !table.languages.iter().any(|l| l == lang)
    {
        return Err(format!(
            "language '{}' not in table (has: {})",
            lang,
            table.languages.join(", ")
        ));
    }

    print_view(&table, lang.as_deref(), filter.as_deref().unwrap_or(""), full);
    Ok(())
}

fn print_view(table: &TranslationTable, lang: Option<&str>, filter: &str, full: bool) {
    println!("=== Table ===");
    if !table.url.is_empty() {
        println!("Source: {}", table.url);
    }
    println!("Default language: {}", table.default_language);
    println!("Languages: {}", table.languages.join(", "));

    let entries = table.search(filter);
    println!("Entries: {}", entries.len());

    for entry in entries {
        println!("\n  {}", entry.key);
        for language in &table.languages {
            if let Some(selected) = lang
                && selected != language
            {
                continue;
            }
            let text = entry.text(language).unwrap_or_default();
            println!("    {}: {}", language, truncate(text, full));
        }
    }
}

fn truncate(value: &str, full: bool) -> String {
    if full || value.chars().count() <= TRUNCATE_AT {
        return value.to_string();
    }
    let head: String = value.chars().take(TRUNCATE_AT).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_is_char_safe() {
        let long = "й".repeat(60);
        let short = truncate(&long, false);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), TRUNCATE_AT + 3);
        assert_eq!(truncate(&long, true), long);
        assert_eq!(truncate("short", false), "short");
    }

    #[test]
    fn test_view_rejects_unknown_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        let mut table = locsheet::TranslationTable::new("en");
        table
            .load(&locsheet::sheet::parse("Key,ru,en\nk,a,b\n", None).unwrap())
            .unwrap();
        locsheet::Persist::write_to(&table, &path).unwrap();

        let error = run_view_command(
            path.to_string_lossy().to_string(),
            Some("de".to_string()),
            None,
            false,
        )
        .unwrap_err();
        assert!(error.contains("'de' not in table"));
    }
}
