//! In-memory reference host.
//!
//! Models the round pacing of a real incremental build: units queue
//! when added or emitted, a round presents everything queued, and a
//! unit's declarations only resolve once the unit has been presented.
//! Emitting a companion therefore never makes it resolvable within the
//! same round.

use std::collections::{BTreeSet, VecDeque};

use lokal_schema::{QualifiedName, markers};
use quote::ToTokens;

use crate::diag::DiagnosticSink;
use crate::error::{EmitError, HostError};
use crate::generate::GeneratedUnit;
use crate::helper::{declares_struct, find_marker};
use crate::host::{Host, TreeHandle, TypeToken};
use crate::round::{BuildSession, RoundReport, RoundUnit};

#[derive(Clone, Debug)]
struct StoredUnit {
    package: String,
    file: syn::File,
}

///
/// MemoryHost
/// A complete host over in-memory units. Also the test double for the
/// degraded modes a restricted environment can exhibit.
///

#[derive(Debug)]
pub struct MemoryHost {
    units: Vec<StoredUnit>,
    queued: VecDeque<usize>,
    entered: BTreeSet<QualifiedName>,
    mutable_trees: bool,
    reject_edits: bool,
    emit_failures: BTreeSet<QualifiedName>,
    emitted_log: Vec<GeneratedUnit>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self {
            units: Vec::new(),
            queued: VecDeque::new(),
            entered: BTreeSet::new(),
            mutable_trees: true,
            reject_edits: false,
            emit_failures: BTreeSet::new(),
            emitted_log: Vec::new(),
        }
    }
}

impl MemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Behave like a host without tree mutation support: every
    /// `declaration_tree` call answers `None`.
    pub fn disable_mutation(&mut self) {
        self.mutable_trees = false;
    }

    /// Keep handing out tree handles but refuse every edit.
    pub fn reject_edits(&mut self) {
        self.reject_edits = true;
    }

    /// Make writing the unit named `name` fail, for exercising the
    /// emission error path.
    pub fn fail_emission_of(&mut self, name: QualifiedName) {
        self.emit_failures.insert(name);
    }

    /// Add one source unit to the build queue.
    pub fn add_source(&mut self, package: impl Into<String>, source: &str) -> Result<(), syn::Error> {
        let file = syn::parse_file(source)?;
        self.push_unit(package.into(), file);
        Ok(())
    }

    /// Drain the queue into the next round's unit set, marking every
    /// drained unit's declarations as resolvable from here on.
    pub fn round_units(&mut self) -> Vec<RoundUnit> {
        let mut presented = Vec::new();
        while let Some(index) = self.queued.pop_front() {
            let (package, names, file) = {
                let unit = &self.units[index];
                (
                    unit.package.clone(),
                    unit_decl_names(&unit.package, &unit.file),
                    unit.file.clone(),
                )
            };
            self.entered.extend(names);
            presented.push(RoundUnit { package, file });
        }
        presented
    }

    /// Current source text of the unit declaring `name`, mutations
    /// included.
    #[must_use]
    pub fn declaration_source(&self, name: &QualifiedName) -> Option<String> {
        self.units
            .iter()
            .find(|unit| unit.package == name.package && declares_struct(&unit.file, &name.name))
            .map(|unit| unit.file.to_token_stream().to_string())
    }

    /// Every unit successfully emitted so far, in emission order.
    #[must_use]
    pub fn emitted(&self) -> &[GeneratedUnit] {
        &self.emitted_log
    }

    fn push_unit(&mut self, package: String, file: syn::File) {
        let index = self.units.len();
        self.units.push(StoredUnit { package, file });
        self.queued.push_back(index);
    }
}

impl Host for MemoryHost {
    fn resolve_type(&self, name: &QualifiedName) -> Option<TypeToken> {
        self.entered
            .iter()
            .position(|entered| entered == name)
            .map(|index| TypeToken::new(index as u64))
    }

    fn is_recognized_entity(&self, decl: &syn::ItemStruct) -> bool {
        find_marker(&decl.attrs, markers::ENTITY).is_some()
    }

    fn declaration_tree(&self, name: &QualifiedName) -> Option<TreeHandle> {
        if !self.mutable_trees {
            return None;
        }
        self.units
            .iter()
            .position(|unit| unit.package == name.package && declares_struct(&unit.file, &name.name))
            .map(|index| TreeHandle::new(index as u64))
    }

    fn mutate(
        &mut self,
        handle: TreeHandle,
        edit: &mut dyn FnMut(&mut syn::File),
    ) -> Result<(), HostError> {
        if self.reject_edits {
            return Err(HostError::EditRejected(
                "edits are disabled for this host".to_owned(),
            ));
        }
        let unit = usize::try_from(handle.raw())
            .ok()
            .and_then(|index| self.units.get_mut(index))
            .ok_or(HostError::UnknownHandle(handle))?;
        edit(&mut unit.file);
        Ok(())
    }

    fn emit_unit(&mut self, unit: GeneratedUnit) -> Result<(), EmitError> {
        if self.emit_failures.contains(&unit.name) {
            return Err(EmitError {
                unit: unit.name,
                reason: "injected write failure".to_owned(),
            });
        }
        let file = syn::parse_file(&unit.source).map_err(|err| EmitError {
            unit: unit.name.clone(),
            reason: err.to_string(),
        })?;
        self.push_unit(unit.name.package.clone(), file);
        self.emitted_log.push(unit);
        Ok(())
    }
}

/// Drive `session` to completion against `host`: one round per queue
/// drain, then the terminal flush.
pub fn run_build(
    host: &mut MemoryHost,
    session: &mut BuildSession,
    sink: &dyn DiagnosticSink,
) -> Vec<RoundReport> {
    let mut reports = Vec::new();
    loop {
        let units = host.round_units();
        if units.is_empty() {
            break;
        }
        reports.push(session.process_round(host, &units, sink));
    }
    reports.push(session.finish(host, sink));
    reports
}

fn unit_decl_names(package: &str, file: &syn::File) -> Vec<QualifiedName> {
    let mut names = Vec::new();
    for item in &file.items {
        let ident = match item {
            syn::Item::Struct(decl) => &decl.ident,
            syn::Item::Enum(decl) => &decl.ident,
            syn::Item::Trait(decl) => &decl.ident,
            syn::Item::Type(decl) => &decl.ident,
            _ => continue,
        };
        names.push(QualifiedName::new(package, ident.to_string()));
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitted_struct(package: &str, name: &str) -> GeneratedUnit {
        GeneratedUnit {
            name: QualifiedName::new(package, name),
            source: format!("pub struct {name} {{}}"),
        }
    }

    #[test]
    fn emitted_units_resolve_only_after_the_next_round() {
        let mut host = MemoryHost::new();
        host.add_source("shop", "pub struct Badge {}").unwrap();
        let first = host.round_units();
        assert_eq!(first.len(), 1);

        let name = QualifiedName::new("shop", "BadgeTranslation");
        host.emit_unit(emitted_struct("shop", "BadgeTranslation"))
            .unwrap();
        assert!(host.resolve_type(&name).is_none());

        let second = host.round_units();
        assert_eq!(second.len(), 1);
        assert!(host.resolve_type(&name).is_some());
    }

    #[test]
    fn queue_drains_once() {
        let mut host = MemoryHost::new();
        host.add_source("shop", "pub struct Badge {}").unwrap();

        assert_eq!(host.round_units().len(), 1);
        assert!(host.round_units().is_empty());
    }

    #[test]
    fn mutation_persists_in_the_stored_unit() {
        let mut host = MemoryHost::new();
        host.add_source("shop", "pub struct Badge {}").unwrap();
        let _ = host.round_units();

        let name = QualifiedName::new("shop", "Badge");
        let handle = host.declaration_tree(&name).unwrap();
        host.mutate(handle, &mut |file| {
            file.items.push(syn::parse_quote!(impl Badge {}));
        })
        .unwrap();

        let source = host.declaration_source(&name).unwrap();
        assert!(source.contains("impl Badge"));
    }

    #[test]
    fn unknown_handle_is_rejected() {
        let mut host = MemoryHost::new();
        let err = host
            .mutate(TreeHandle::new(7), &mut |_| {})
            .unwrap_err();
        assert!(matches!(err, HostError::UnknownHandle(handle) if handle.raw() == 7));
    }

    #[test]
    fn disabled_mutation_hides_every_tree() {
        let mut host = MemoryHost::new();
        host.add_source("shop", "pub struct Badge {}").unwrap();
        let _ = host.round_units();
        host.disable_mutation();

        assert!(host.declaration_tree(&QualifiedName::new("shop", "Badge")).is_none());
    }

    #[test]
    fn garbled_emission_reports_the_unit() {
        let mut host = MemoryHost::new();
        let err = host
            .emit_unit(GeneratedUnit {
                name: QualifiedName::new("shop", "BadgeTranslation"),
                source: "pub struct {".to_owned(),
            })
            .unwrap_err();
        assert_eq!(err.unit.name, "BadgeTranslation");
    }
}
