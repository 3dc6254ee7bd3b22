use crate::record::Translation;
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// TranslationMap
/// Locale-keyed storage injected into localized entities. Keys are
/// language tags and always match the entry's own locale; mutation goes
/// through `insert`/`entry_for` to keep that alignment.
///

#[derive(Clone, Debug, Deref, Deserialize, IntoIterator, Serialize)]
#[serde(transparent)]
pub struct TranslationMap<T: Translation> {
    #[into_iterator(owned, ref)]
    entries: BTreeMap<String, T>,
}

impl<T: Translation> TranslationMap<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert keyed by the entry's own locale, replacing any previous
    /// entry for that language.
    pub fn insert(&mut self, translation: T) -> Option<T> {
        self.entries
            .insert(translation.locale().to_owned(), translation)
    }

    /// Fetch the entry for `language`, creating it with `init` when
    /// absent. `init` must produce an entry whose record carries the
    /// same language.
    pub fn entry_for(&mut self, language: &str, init: impl FnOnce() -> T) -> &mut T {
        self.entries.entry(language.to_owned()).or_insert_with(init)
    }

    pub fn remove(&mut self, language: &str) -> Option<T> {
        self.entries.remove(language)
    }

    /// Language tags present, in key order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<T: Translation> Default for TranslationMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
