use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

///
/// TranslationRecord
/// Shared persistent base of every generated translation type: a
/// surrogate id plus the locale tag the row belongs to. Identity is the
/// locale alone; the id is storage bookkeeping.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TranslationRecord {
    pub id: Option<i64>,
    pub locale: String,
}

impl TranslationRecord {
    /// Fresh unsaved record for one language.
    #[must_use]
    pub fn for_language(language: &str) -> Self {
        Self {
            id: None,
            locale: language.to_owned(),
        }
    }
}

impl PartialEq for TranslationRecord {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl Eq for TranslationRecord {}

impl Hash for TranslationRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.locale.hash(state);
    }
}

///
/// Translation
/// Implemented by generated translation types; gives the runtime access
/// to the embedded record.
///

pub trait Translation {
    fn record(&self) -> &TranslationRecord;

    fn record_mut(&mut self) -> &mut TranslationRecord;

    /// Language tag this translation belongs to.
    fn locale(&self) -> &str {
        &self.record().locale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(record: &TranslationRecord) -> u64 {
        let mut hasher = DefaultHasher::new();
        record.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn identity_is_locale_not_id() {
        let saved = TranslationRecord {
            id: Some(7),
            locale: "tr".to_owned(),
        };
        let unsaved = TranslationRecord::for_language("tr");
        let other = TranslationRecord::for_language("en");

        assert_eq!(saved, unsaved);
        assert_eq!(hash_of(&saved), hash_of(&unsaved));
        assert_ne!(saved, other);
    }

    #[test]
    fn for_language_starts_unsaved() {
        let record = TranslationRecord::for_language("de");
        assert_eq!(record.id, None);
        assert_eq!(record.locale, "de");
    }
}
