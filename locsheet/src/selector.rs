//! Active-language tracking with pluggable persistence and change
//! notification.

use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// Persistence seam for the current language (a settings store, a file, a
/// platform preference API). The selector owns the policy, the store only
/// remembers the value.
pub trait LanguageStore {
    /// The persisted language, if one was ever saved.
    fn load_current(&self) -> Option<String>;

    /// Persists a new current language.
    fn save_current(&mut self, language: &str);
}

/// In-memory store for tests and hosts without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    current: Option<String>,
}

impl LanguageStore for MemoryStore {
    fn load_current(&self) -> Option<String> {
        self.current.clone()
    }

    fn save_current(&mut self, language: &str) {
        self.current = Some(language.to_string());
    }
}

/// Token returned by [`LanguageSelector::subscribe`]; pass it back to
/// [`LanguageSelector::unsubscribe`] to detach the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

type ChangeCallback = Box<dyn FnMut(&str)>;

/// Tracks the active language within an ordered, fixed set of supported
/// codes.
///
/// Changing the language persists the value through the injected store and
/// notifies subscribers synchronously, in subscription order, only when the
/// value actually changed. Callbacks are informational; the borrow rules
/// keep them from mutating the selector re-entrantly.
pub struct LanguageSelector<S: LanguageStore> {
    languages: Vec<String>,
    store: S,
    subscribers: Vec<(Subscription, ChangeCallback)>,
    next_id: u64,
}

impl<S: LanguageStore> LanguageSelector<S> {
    /// Creates a selector over a non-empty, duplicate-free list of language
    /// codes. Each code must parse as a Unicode language identifier.
    pub fn new(languages: Vec<String>, store: S) -> Result<Self, Error> {
        if languages.is_empty() {
            return Err(Error::InvalidLanguages(
                "supported language list is empty".to_string(),
            ));
        }
        for (position, language) in languages.iter().enumerate() {
            if language.parse::<LanguageIdentifier>().is_err() {
                return Err(Error::UnsupportedLanguage(language.clone()));
            }
            if languages[..position].contains(language) {
                return Err(Error::InvalidLanguages(format!(
                    "duplicate language `{}`",
                    language
                )));
            }
        }
        Ok(LanguageSelector {
            languages,
            store,
            subscribers: Vec::new(),
            next_id: 0,
        })
    }

    /// The supported languages, in order.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// The active language: the persisted value when it is still a member
    /// of the supported set, otherwise the first supported language.
    pub fn current(&self) -> String {
        self.store
            .load_current()
            .filter(|stored| self.languages.contains(stored))
            .unwrap_or_else(|| self.languages[0].clone())
    }

    /// Makes `language` current.
    ///
    /// Returns `Ok(false)` without saving or notifying when `language` is
    /// already current; `Ok(true)` after persisting and notifying
    /// subscribers. Unsupported codes are an error.
    pub fn set_current(&mut self, language: &str) -> Result<bool, Error> {
        if !self.languages.iter().any(|l| l == language) {
            return Err(Error::UnsupportedLanguage(language.to_string()));
        }
        if self.current() == language {
            return Ok(false);
        }
        self.store.save_current(language);
        for (_, callback) in &mut self.subscribers {
            callback(language);
        }
        Ok(true)
    }

    /// Advances to the next supported language, wrapping to the first after
    /// the last, and returns the new current language.
    pub fn next(&mut self) -> Result<String, Error> {
        let current = self.current();
        let position = self
            .languages
            .iter()
            .position(|l| *l == current)
            .unwrap_or(0);
        let next = self.languages[(position + 1) % self.languages.len()].clone();
        self.set_current(&next)?;
        Ok(next)
    }

    /// Registers a callback invoked with the new language code on every
    /// change. Returns a token for [`LanguageSelector::unsubscribe`].
    pub fn subscribe(&mut self, callback: impl FnMut(&str) + 'static) -> Subscription {
        let token = Subscription(self.next_id);
        self.next_id += 1;
        self.subscribers.push((token, Box::new(callback)));
        token
    }

    /// Detaches a callback. Returns whether the token was still registered.
    pub fn unsubscribe(&mut self, token: Subscription) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(id, _)| *id != token);
        self.subscribers.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    fn selector() -> LanguageSelector<MemoryStore> {
        LanguageSelector::new(
            vec!["en".to_string(), "ru".to_string()],
            MemoryStore::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_bad_sets() {
        assert!(matches!(
            LanguageSelector::new(Vec::new(), MemoryStore::default()),
            Err(Error::InvalidLanguages(_))
        ));
        assert!(matches!(
            LanguageSelector::new(
                vec!["en".to_string(), "en".to_string()],
                MemoryStore::default()
            ),
            Err(Error::InvalidLanguages(_))
        ));
        assert!(matches!(
            LanguageSelector::new(
                vec!["definitely not a language".to_string()],
                MemoryStore::default()
            ),
            Err(Error::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_current_defaults_to_first_language() {
        assert_eq!(selector().current(), "en");
    }

    #[test]
    fn test_current_ignores_out_of_set_store_value() {
        let mut store = MemoryStore::default();
        store.save_current("de");
        let selector =
            LanguageSelector::new(vec!["en".to_string(), "ru".to_string()], store).unwrap();
        assert_eq!(selector.current(), "en");
    }

    #[test]
    fn test_set_current_persists_and_notifies_once() {
        let mut selector = selector();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        selector.subscribe(move |lang| sink.borrow_mut().push(lang.to_string()));

        assert!(selector.set_current("ru").unwrap());
        assert_eq!(selector.current(), "ru");
        // No-op set: no save, no notification.
        assert!(!selector.set_current("ru").unwrap());
        assert_eq!(*seen.borrow(), vec!["ru".to_string()]);
    }

    #[test]
    fn test_set_current_rejects_unsupported() {
        let mut selector = selector();
        assert!(matches!(
            selector.set_current("de"),
            Err(Error::UnsupportedLanguage(_))
        ));
        assert_eq!(selector.current(), "en");
    }

    #[test]
    fn test_next_cycles_through_languages() {
        let mut selector = selector();
        selector.set_current("ru").unwrap();
        assert_eq!(selector.next().unwrap(), "en");
        assert_eq!(selector.next().unwrap(), "ru");
        assert_eq!(selector.current(), "ru");
    }

    #[test]
    fn test_subscribers_notified_in_subscription_order() {
        let mut selector = selector();
        let order = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&order);
        let second = Rc::clone(&order);
        selector.subscribe(move |_| first.borrow_mut().push("first"));
        selector.subscribe(move |_| second.borrow_mut().push("second"));

        selector.set_current("ru").unwrap();
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut selector = selector();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let token = selector.subscribe(move |_| *sink.borrow_mut() += 1);

        selector.set_current("ru").unwrap();
        assert!(selector.unsubscribe(token));
        assert!(!selector.unsubscribe(token));
        selector.set_current("en").unwrap();
        assert_eq!(*count.borrow(), 1);
    }
}
