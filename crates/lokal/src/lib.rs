//! ## Crate layout
//! - `compiler`: extraction, companion generation, tree mutation, and round scheduling.
//! - `runtime`: locale handling and the types generated code references.
//! - `schema`: entity model, qualified names, and deterministic naming rules.
//!
//! The `prelude` module mirrors the surface used when driving a build session
//! against a host. Generated code depends on `lokal-runtime` directly, not on
//! this meta-crate.

pub use lokal_compiler as compiler;
pub use lokal_runtime as runtime;
pub use lokal_schema as schema;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Build Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::compiler::{
        BufferSink, BuildSession, Diagnostic, DiagnosticSink as _, EntityState, Host as _,
        MemoryHost, RoundReport, RoundUnit, Severity, run_build,
    };
    pub use crate::runtime::{Locale, TranslationMap, current_locale, with_current_locale};
    pub use crate::schema::{EntityModel, LocalizedFieldInfo, QualifiedName};
}
