//! Data model shared by the localization engine: declaration identities,
//! extracted entity models, the marker vocabulary, and the naming rules
//! every generated artifact follows.

pub mod markers;
pub mod model;
pub mod name;
pub mod naming;

pub use model::{EntityModel, LocalizedFieldInfo, PendingMutation};
pub use name::QualifiedName;
