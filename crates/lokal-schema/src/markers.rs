//! Marker-attribute vocabulary of the source dialect.

/// Field marker requesting localization.
pub const LOCALIZED: &str = "localized";

/// Deprecated type-level marker; per-field discovery supersedes it but
/// declarations carrying it still converge to the same model.
pub const LOCALIZED_ENTITY: &str = "localized_entity";

/// Persistence-framework entity marker. `table` is the only argument
/// read by this engine; the rest belongs to the storage layer.
pub const ENTITY: &str = "entity";

/// Persistence-framework marker for fields excluded from storage.
pub const TRANSIENT: &str = "transient";
