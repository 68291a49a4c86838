//! The `edit` subcommands: set, rename, and remove entries in a table file.

use locsheet::Entry;

use crate::{load_table, save_table};

/// Sets one language's text for a key, creating the entry when absent.
pub fn run_edit_set_command(
    table_path: String,
    key: String,
    lang: String,
    value: String,
) -> Result<(), String> {
    let mut table = load_table(&table_path)?;
    let mut entry = table
        .get(&key)
        .cloned()
        .unwrap_or_else(|| Entry::new(key.clone(), Vec::new()));
    entry.set_text(&lang, value);
    table.upsert(entry).map_err(|e| e.to_string())?;
    save_table(&table, &table_path)?;
    println!("set {} [{}]", key, lang);
    Ok(())
}

pub fn run_edit_rename_command(
    table_path: String,
    old_key: String,
    new_key: String,
) -> Result<(), String> {
    let mut table = load_table(&table_path)?;
    table
        .rename(&old_key, &new_key)
        .map_err(|e| e.to_string())?;
    save_table(&table, &table_path)?;
    println!("renamed {} -> {}", old_key, new_key);
    Ok(())
}

pub fn run_edit_remove_command(table_path: String, key: String) -> Result<(), String> {
    let mut table = load_table(&table_path)?;
    if table.remove(&key).is_none() {
        return Err(format!("key not found: `{}`", key));
    }
    save_table(&table, &table_path)?;
    println!("removed {}", key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use locsheet::{Persist, TranslationTable};

    fn table_file(dir: &tempfile::TempDir) -> String {
        let path = dir.path().join("table.json");
        let mut table = TranslationTable::new("en");
        table
            .load(&locsheet::sheet::parse("Key,ru,en\ngreeting,privet,Hello\n", None).unwrap())
            .unwrap();
        table.write_to(&path).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_set_updates_existing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = table_file(&dir);
        run_edit_set_command(path.clone(), "greeting".to_string(), "en".to_string(), "Hi".to_string())
            .unwrap();
        let table = TranslationTable::read_from(&path).unwrap();
        assert_eq!(table.get_text("greeting", "en", "en"), "Hi");
        assert_eq!(table.get_text("greeting", "ru", "en"), "privet");
    }

    #[test]
    fn test_set_creates_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = table_file(&dir);
        run_edit_set_command(path.clone(), "new_key".to_string(), "en".to_string(), "New".to_string())
            .unwrap();
        let table = TranslationTable::read_from(&path).unwrap();
        assert!(table.has_key("new_key"));
    }

    #[test]
    fn test_rename_collision_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = table_file(&dir);
        run_edit_set_command(path.clone(), "other".to_string(), "en".to_string(), "x".to_string())
            .unwrap();
        let error =
            run_edit_rename_command(path, "greeting".to_string(), "other".to_string()).unwrap_err();
        assert!(error.contains("duplicate key"));
    }

    #[test]
    fn test_remove_missing_key_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = table_file(&dir);
        let error = run_edit_remove_command(path, "absent".to_string()).unwrap_err();
        assert!(error.contains("key not found"));
    }
}
