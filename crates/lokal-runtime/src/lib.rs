//! Runtime surface referenced by generated localization code.
//!
//! ## Crate layout
//! - `locale`: language tags and ambient current-locale resolution.
//! - `map`: the locale-keyed translation map injected into entities.
//! - `parent`: typed back-references from translations to their owner.
//! - `record`: the shared persistent base of generated translation types.
//!
//! Generated accessors reference everything here through the crate root,
//! so the flat re-exports below are part of the generation contract.

pub mod locale;
pub mod map;
pub mod parent;
pub mod record;

pub use locale::{DEFAULT_LANGUAGE, Locale, LocaleError, current_locale, with_current_locale};
pub use map::TranslationMap;
pub use parent::{ParentRef, Persisted};
pub use record::{Translation, TranslationRecord};
