//! The capability surface a build environment offers the engine.
//!
//! The engine never touches the filesystem or a compiler API directly;
//! everything flows through [`Host`]. A full-featured host hands out
//! declaration trees and applies edits. A restricted one may return
//! `None` from [`Host::declaration_tree`], in which case companions
//! are still emitted and only the in-place rewrite is skipped.

mod memory;

pub use memory::{MemoryHost, run_build};

use lokal_schema::QualifiedName;

use crate::error::{EmitError, HostError};
use crate::generate::GeneratedUnit;

///
/// TreeHandle
/// Opaque ticket for one mutable declaration tree. Only the host that
/// issued it can redeem it.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TreeHandle(u64);

impl TreeHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

///
/// TypeToken
/// Opaque proof that a qualified name resolved to a known type.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TypeToken(u64);

impl TypeToken {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

///
/// Host
/// Build-environment capabilities the engine runs against.
///

pub trait Host {
    /// Resolve a type by qualified name. A generated unit's types stay
    /// unresolvable until the unit has entered a later round, which is
    /// what paces mutation one round behind emission.
    fn resolve_type(&self, name: &QualifiedName) -> Option<TypeToken>;

    /// Whether this struct declaration is a persistent entity under
    /// the host's persistence framework. The engine never guesses;
    /// a struct the host disowns is reported, not processed.
    fn is_recognized_entity(&self, decl: &syn::ItemStruct) -> bool;

    /// Hand out the mutable tree declaring `name`, or `None` when this
    /// host cannot mutate declarations at all.
    fn declaration_tree(&self, name: &QualifiedName) -> Option<TreeHandle>;

    /// Run `edit` against the tree behind `handle` and keep the result.
    fn mutate(
        &mut self,
        handle: TreeHandle,
        edit: &mut dyn FnMut(&mut syn::File),
    ) -> Result<(), HostError>;

    /// Write one generated unit into the build, making it part of a
    /// future round.
    fn emit_unit(&mut self, unit: GeneratedUnit) -> Result<(), EmitError>;
}
