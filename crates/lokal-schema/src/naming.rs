//! Deterministic naming rules.
//!
//! Every name the engine produces (companion types, tables, accessors)
//! derives from these functions alone, so generation, mutation, and the
//! tests agree by construction.

use convert_case::{Case, Casing};

/// Name of the injected translation-map field and its getter.
pub const TRANSLATIONS_FIELD: &str = "translations";

/// Name of the injected translation-map setter.
pub const TRANSLATIONS_SETTER: &str = "set_translations";

/// Persistence-record field of a generated translation type.
pub const RECORD_FIELD: &str = "record";

/// Owner-reference field of a generated translation type.
pub const PARENT_FIELD: &str = "parent";

/// Whether a localized field name would collide with a field the
/// generated code itself declares, on the entity or its companion.
#[must_use]
pub fn is_reserved_field(name: &str) -> bool {
    matches!(name, TRANSLATIONS_FIELD | RECORD_FIELD | PARENT_FIELD)
}

/// Companion translation type name for an entity.
#[must_use]
pub fn translation_type_name(entity: &str) -> String {
    format!("{entity}Translation")
}

/// Accessor-contract trait name for an entity.
#[must_use]
pub fn contract_type_name(entity: &str) -> String {
    format!("{entity}Localized")
}

/// Default table name of an entity declaration.
#[must_use]
pub fn entity_table_name(entity: &str) -> String {
    entity.to_case(Case::Snake)
}

/// Table name of a generated translation type, from the owning entity's
/// resolved table name.
#[must_use]
pub fn translation_table_name(base: &str) -> String {
    format!("{base}_translations")
}

/// Current-locale getter for a localized field.
#[must_use]
pub fn getter(field: &str) -> String {
    field.to_owned()
}

/// Explicit-locale getter for a localized field.
#[must_use]
pub fn getter_in(field: &str) -> String {
    format!("{field}_in")
}

/// Current-locale setter for a localized field.
#[must_use]
pub fn setter(field: &str) -> String {
    format!("set_{field}")
}

/// Explicit-locale setter for a localized field.
#[must_use]
pub fn setter_in(field: &str) -> String {
    format!("set_{field}_in")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn companion_names_are_suffixed() {
        assert_eq!(translation_type_name("Badge"), "BadgeTranslation");
        assert_eq!(contract_type_name("Badge"), "BadgeLocalized");
    }

    #[test]
    fn table_names_snake_case_the_entity() {
        assert_eq!(entity_table_name("Badge"), "badge");
        assert_eq!(entity_table_name("CourseModule"), "course_module");
        assert_eq!(translation_table_name("badge"), "badge_translations");
        assert_eq!(translation_table_name("permits"), "permits_translations");
    }

    #[test]
    fn accessor_names_fan_out_from_the_field() {
        assert_eq!(getter("name"), "name");
        assert_eq!(getter_in("name"), "name_in");
        assert_eq!(setter("name"), "set_name");
        assert_eq!(setter_in("name"), "set_name_in");
    }

    #[test]
    fn reserved_names_cover_both_sides_of_the_generation() {
        assert!(is_reserved_field("translations"));
        assert!(is_reserved_field("record"));
        assert!(is_reserved_field("parent"));
        assert!(!is_reserved_field("name"));
        assert!(!is_reserved_field("set_translations"));
    }
}
