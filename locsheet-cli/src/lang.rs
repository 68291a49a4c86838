//! The `lang` subcommand: language selection over a JSON settings store.

use locsheet::LanguageSelector;

use crate::settings::FileLanguageStore;

/// What to do with the active language.
#[derive(Debug, Clone)]
pub enum LangAction {
    Get,
    Set(String),
    Next,
}

pub fn run_lang_command(
    settings_path: String,
    languages: Vec<String>,
    action: LangAction,
) -> Result<(), String> {
    let store = FileLanguageStore::new(settings_path);
    let mut selector = LanguageSelector::new(languages, store).map_err(|e| e.to_string())?;

    match action {
        LangAction::Get => println!("{}", selector.current()),
        LangAction::Set(language) => {
            let changed = selector.set_current(&language).map_err(|e| e.to_string())?;
            if changed {
                println!("language set to {}", language);
            } else {
                println!("language already {}", language);
            }
        }
        LangAction::Next => {
            let next = selector.next().map_err(|e| e.to_string())?;
            println!("language set to {}", next);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn langs() -> Vec<String> {
        vec!["en".to_string(), "ru".to_string()]
    }

    #[test]
    fn test_set_then_next_wraps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json").to_string_lossy().to_string();

        run_lang_command(path.clone(), langs(), LangAction::Set("ru".to_string())).unwrap();
        run_lang_command(path.clone(), langs(), LangAction::Next).unwrap();

        let store = FileLanguageStore::new(&path);
        let selector = LanguageSelector::new(langs(), store).unwrap();
        assert_eq!(selector.current(), "en");
    }

    #[test]
    fn test_set_unsupported_language_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json").to_string_lossy().to_string();
        let error =
            run_lang_command(path, langs(), LangAction::Set("de".to_string())).unwrap_err();
        assert!(error.contains("unsupported language"));
    }
}
