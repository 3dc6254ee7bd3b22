//! Round scheduling for a build session.
//!
//! Each round extracts entity models from the units the host presents,
//! emits companion units for newly claimed entities, and mutates every
//! entity whose companion type has become resolvable. Companions
//! emitted in round N resolve in round N+1 at the earliest, so a
//! typical entity is discovered in one round and mutated in the next.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use lokal_schema::{EntityModel, PendingMutation, QualifiedName};
use remain::sorted;

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::error::{Error, MutateError};
use crate::generate::GeneratedUnit;
use crate::host::Host;
use crate::{extract, generate, mutate};

///
/// EntityState
/// Where an entity sits in the discover-emit-mutate progression.
///

#[sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntityState {
    CompanionEmitted,
    Mutated,
    Undiscovered,
}

///
/// RoundUnit
/// One compilation unit as presented by the host for a round.
///

#[derive(Clone, Debug)]
pub struct RoundUnit {
    pub package: String,
    pub file: syn::File,
}

impl RoundUnit {
    pub fn parse(package: impl Into<String>, source: &str) -> Result<Self, syn::Error> {
        Ok(Self {
            package: package.into(),
            file: syn::parse_file(source)?,
        })
    }
}

///
/// RoundReport
/// What one round did, in deterministic extraction order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoundReport {
    pub round: u32,
    pub discovered: Vec<QualifiedName>,
    pub emitted: Vec<QualifiedName>,
    pub mutated: Vec<QualifiedName>,
    pub deferred: Vec<QualifiedName>,
    pub skipped: Vec<QualifiedName>,
}

///
/// EmittedSet
/// Claim-once registry of entities whose companions have been emitted.
/// Claiming is atomic, so hosts that extract units on worker threads
/// cannot double-emit a companion pair.
///

#[derive(Debug, Default)]
pub struct EmittedSet {
    claimed: Mutex<BTreeSet<QualifiedName>>,
}

impl EmittedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `name`, returning whether this call was the first to do so.
    pub fn try_claim(&self, name: &QualifiedName) -> bool {
        self.claimed
            .lock()
            .expect("claim set mutex poisoned")
            .insert(name.clone())
    }

    #[must_use]
    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.claimed
            .lock()
            .expect("claim set mutex poisoned")
            .contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.claimed.lock().expect("claim set mutex poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

///
/// BuildSession
/// Owns all scheduling state for one build. Sessions are created per
/// build and dropped after the terminal flush; nothing is global.
///

#[derive(Debug, Default)]
pub struct BuildSession {
    round: u32,
    emitted: EmittedSet,
    pending: BTreeMap<QualifiedName, PendingMutation>,
    mutated: BTreeSet<QualifiedName>,
    degraded: BTreeSet<QualifiedName>,
}

impl BuildSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rounds completed so far.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Entities claimed but still waiting for their companion type to
    /// become resolvable.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn state(&self, name: &QualifiedName) -> EntityState {
        if self.mutated.contains(name) {
            EntityState::Mutated
        } else if self.emitted.contains(name) {
            EntityState::CompanionEmitted
        } else {
            EntityState::Undiscovered
        }
    }

    /// Whether `name` kept its companions but lost its mutation. A
    /// degraded entity still compiles against the emitted contract;
    /// only the in-place rewrite was skipped.
    #[must_use]
    pub fn is_degraded(&self, name: &QualifiedName) -> bool {
        self.degraded.contains(name)
    }

    /// Run one round over `units`: extract, claim and emit companions
    /// for new entities, then mutate everything now resolvable.
    pub fn process_round(
        &mut self,
        host: &mut dyn Host,
        units: &[RoundUnit],
        sink: &dyn DiagnosticSink,
    ) -> RoundReport {
        self.round += 1;
        let mut report = RoundReport {
            round: self.round,
            ..RoundReport::default()
        };

        for model in extract::extract_units(units, &*host, sink) {
            let name = model.qualified_name();
            report.discovered.push(name.clone());

            // the claim is consumed even if emission then fails; a
            // broken write never retries on a later sighting
            if !self.emitted.try_claim(&name) {
                continue;
            }
            emit_companions(host, &model, sink, &mut report);
            self.pending.insert(
                name,
                PendingMutation {
                    model,
                    queued_in_round: self.round,
                },
            );
        }

        self.resolve_pending(host, sink, &mut report);
        report
    }

    /// Terminal flush. Runs one last resolution pass, then reports
    /// every entity whose companion never resolved. Nothing defers
    /// past this point.
    pub fn finish(&mut self, host: &mut dyn Host, sink: &dyn DiagnosticSink) -> RoundReport {
        self.round += 1;
        let mut report = RoundReport {
            round: self.round,
            ..RoundReport::default()
        };

        self.resolve_pending(host, sink, &mut report);
        report.deferred.clear();

        for (name, entry) in std::mem::take(&mut self.pending) {
            sink.report(
                Diagnostic::warning(format!(
                    "companion type for `{name}` never became resolvable (queued in round {}); its declaration was left unmutated",
                    entry.queued_in_round
                ))
                .with_subject(name.clone()),
            );
            self.degraded.insert(name.clone());
            report.skipped.push(name);
        }

        report
    }

    fn resolve_pending(
        &mut self,
        host: &mut dyn Host,
        sink: &dyn DiagnosticSink,
        report: &mut RoundReport,
    ) {
        let due: Vec<QualifiedName> = self.pending.keys().cloned().collect();
        for name in due {
            let translation = {
                let Some(entry) = self.pending.get(&name) else {
                    continue;
                };
                entry.model.translation_name()
            };
            if host.resolve_type(&translation).is_none() {
                report.deferred.push(name);
                continue;
            }

            let Some(entry) = self.pending.remove(&name) else {
                continue;
            };
            self.mutate_entity(host, &entry.model, sink, report);
        }
    }

    fn mutate_entity(
        &mut self,
        host: &mut dyn Host,
        model: &EntityModel,
        sink: &dyn DiagnosticSink,
        report: &mut RoundReport,
    ) {
        let name = model.qualified_name();

        let Some(handle) = host.declaration_tree(&name) else {
            sink.report(
                Diagnostic::warning(format!(
                    "host cannot provide the declaration tree for `{name}`; companions were generated but the declaration stays unmutated"
                ))
                .with_subject(name.clone()),
            );
            self.degraded.insert(name.clone());
            report.skipped.push(name);
            return;
        };

        let mut outcome: Result<(), MutateError> = Ok(());
        let host_result = host.mutate(handle, &mut |file| {
            outcome = mutate::apply(file, model, sink).map(|_| ());
        });

        let failure = match host_result {
            Err(err) => Some(Error::from(err)),
            Ok(()) => outcome.err().map(Error::from),
        };
        if let Some(error) = failure {
            sink.report(
                Diagnostic::new(
                    error.severity(),
                    format!("in-place mutation of `{name}` failed: {error}"),
                )
                .with_subject(name.clone()),
            );
            self.degraded.insert(name.clone());
            report.skipped.push(name);
            return;
        }

        self.mutated.insert(name.clone());
        report.mutated.push(name);
    }
}

fn emit_companions(
    host: &mut dyn Host,
    model: &EntityModel,
    sink: &dyn DiagnosticSink,
    report: &mut RoundReport,
) {
    let units: [GeneratedUnit; 2] = [
        generate::translation_unit(model),
        generate::contract_unit(model),
    ];
    for unit in units {
        let unit_name = unit.name.clone();
        match host.emit_unit(unit) {
            Ok(()) => report.emitted.push(unit_name),
            Err(err) => {
                let error = Error::from(err);
                sink.report(
                    Diagnostic::new(error.severity(), error.to_string())
                        .with_subject(model.qualified_name()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_are_exclusive_across_threads() {
        let set = EmittedSet::new();
        let name = QualifiedName::new("shop", "Badge");

        let wins = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| set.try_claim(&name)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("claim thread panicked"))
                .filter(|won| *won)
                .count()
        });

        assert_eq!(wins, 1);
        assert!(set.contains(&name));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn fresh_session_knows_nothing() {
        let session = BuildSession::new();
        let name = QualifiedName::new("shop", "Badge");

        assert_eq!(session.round(), 0);
        assert_eq!(session.pending_len(), 0);
        assert_eq!(session.state(&name), EntityState::Undiscovered);
        assert!(!session.is_degraded(&name));
    }
}
