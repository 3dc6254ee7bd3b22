//! Companion unit generation.
//!
//! Both units regenerate from scratch on every build and are emitted at
//! most once per entity per build; the at-most-once part is the round
//! scheduler's claim set, not anything in here. Output is rendered
//! token text, byte-for-byte deterministic for equal models.

pub mod contract;
pub mod translation;

pub use contract::contract_unit;
pub use translation::translation_unit;

use lokal_schema::QualifiedName;
use proc_macro2::TokenStream;

/// Header line opening every generated unit.
pub const GENERATED_HEADER: &str = "// Generated by lokal. Do not edit.";

///
/// GeneratedUnit
/// One synthesized compilation unit, ready for host emission.
///

#[derive(Clone, Debug)]
pub struct GeneratedUnit {
    pub name: QualifiedName,
    pub source: String,
}

impl GeneratedUnit {
    fn render(name: QualifiedName, tokens: TokenStream) -> Self {
        Self {
            name,
            source: format!("{GENERATED_HEADER}\n\n{tokens}"),
        }
    }
}
