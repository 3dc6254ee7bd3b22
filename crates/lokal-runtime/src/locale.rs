//! Locale resolution boundary.
//!
//! Generated accessors never receive a locale from their caller in the
//! current-locale variants; they ask `current_locale` instead. Request
//! or task scoped resolvers install a temporary override through
//! `with_current_locale`; everything else sees the process default.

use serde::{Deserialize, Serialize};
use std::{cell::RefCell, fmt, str::FromStr};
use thiserror::Error as ThisError;

thread_local! {
    static LOCALE_OVERRIDE: RefCell<Option<Locale>> = const { RefCell::new(None) };
}

/// Language used when no override is installed.
pub const DEFAULT_LANGUAGE: &str = "en";

///
/// LocaleError
///

#[derive(Debug, ThisError)]
pub enum LocaleError {
    #[error("empty locale tag")]
    Empty,

    #[error("malformed locale tag `{0}`: expected `lang` or `lang-REGION`")]
    Malformed(String),
}

///
/// Locale
/// A language tag with an optional region, e.g. `en` or `en-US`.
/// Translation lookup keys on the language part alone.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_owned(),
            region: None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{region}", self.language),
            None => f.write_str(&self.language),
        }
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    /// Accepts `lang`, `lang-REGION`, and the underscore spelling
    /// `lang_REGION`; case is normalized either way.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if tag.is_empty() {
            return Err(LocaleError::Empty);
        }

        let (language, region) = match tag.split_once(['-', '_']) {
            Some((language, region)) => (language, Some(region)),
            None => (tag, None),
        };

        let language_ok = (2..=8).contains(&language.len())
            && language.bytes().all(|b| b.is_ascii_alphabetic());
        let region_ok = region.is_none_or(|region| {
            (2..=3).contains(&region.len()) && region.bytes().all(|b| b.is_ascii_alphanumeric())
        });
        if !language_ok || !region_ok {
            return Err(LocaleError::Malformed(tag.to_owned()));
        }

        Ok(Self {
            language: language.to_ascii_lowercase(),
            region: region.map(str::to_ascii_uppercase),
        })
    }
}

/// Resolve the ambient locale: the innermost scoped override when one
/// is installed, the process default otherwise.
#[must_use]
pub fn current_locale() -> Locale {
    LOCALE_OVERRIDE
        .with(|cell| cell.borrow().clone())
        .unwrap_or_default()
}

/// Run a closure with a temporary current-locale override.
pub fn with_current_locale<T>(locale: Locale, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Locale>);

    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALE_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0.take();
            });
        }
    }

    let prev = LOCALE_OVERRIDE.with(|cell| cell.borrow_mut().replace(locale));
    let _guard = Guard(prev);

    f()
}
