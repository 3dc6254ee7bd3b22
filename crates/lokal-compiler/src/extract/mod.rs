//! Field and entity model extraction.
//!
//! Walks the round's compilation units for localization markers, groups
//! findings into one `EntityModel` per entity, and validates placement
//! before anything downstream runs. A placement problem skips exactly
//! the entity it sits on.

mod args;

pub use args::{EntityArgs, LocalizedArgs};

use crate::{
    diag::{Diagnostic, DiagnosticSink},
    error::{Error, ExtractError},
    helper::find_marker,
    host::Host,
    round::RoundUnit,
};
use lokal_schema::{EntityModel, LocalizedFieldInfo, QualifiedName, markers, naming};
use std::collections::BTreeMap;

/// Extract entity models from every unit presented this round, in
/// qualified-name order.
pub fn extract_units(
    units: &[RoundUnit],
    host: &dyn Host,
    sink: &dyn DiagnosticSink,
) -> Vec<EntityModel> {
    let mut models: BTreeMap<QualifiedName, EntityModel> = BTreeMap::new();

    for unit in units {
        for item in &unit.file.items {
            match item {
                syn::Item::Struct(item) => {
                    if let Some(model) = extract_struct(&unit.package, item, host, sink) {
                        models.entry(model.qualified_name()).or_insert(model);
                    }
                }
                other => scan_misplaced(&unit.package, other, sink),
            }
        }
    }

    models.into_values().collect()
}

/// One struct declaration: collect `#[localized]` fields, fold the
/// legacy type-level marker into the same grouping, and validate.
fn extract_struct(
    package: &str,
    item: &syn::ItemStruct,
    host: &dyn Host,
    sink: &dyn DiagnosticSink,
) -> Option<EntityModel> {
    let subject = QualifiedName::new(package, item.ident.to_string());

    if find_marker(&item.attrs, markers::LOCALIZED).is_some() {
        report(
            sink,
            subject.clone(),
            ExtractError::Placement {
                marker: markers::LOCALIZED,
                placement: "a struct declaration",
                subject,
            },
        );
        return None;
    }

    let legacy = find_marker(&item.attrs, markers::LOCALIZED_ENTITY).is_some();

    let syn::Fields::Named(named) = &item.fields else {
        let marked = item
            .fields
            .iter()
            .any(|field| find_marker(&field.attrs, markers::LOCALIZED).is_some());
        if legacy || marked {
            report(
                sink,
                subject.clone(),
                ExtractError::UnnamedFields { subject },
            );
        }
        return None;
    };

    let mut fields = Vec::new();
    let mut failed = false;

    for field in &named.named {
        let Some(attr) = find_marker(&field.attrs, markers::LOCALIZED) else {
            continue;
        };
        let Some(ident) = &field.ident else {
            continue;
        };
        let name = ident.to_string();

        let marker_args = match args::localized_args(attr) {
            Ok(marker_args) => marker_args,
            Err(source) => {
                report(
                    sink,
                    subject.clone(),
                    ExtractError::BadArguments {
                        marker: markers::LOCALIZED,
                        subject: subject.clone(),
                        source,
                    },
                );
                failed = true;
                continue;
            }
        };

        if naming::is_reserved_field(&name) {
            report(
                sink,
                subject.clone(),
                ExtractError::ReservedField {
                    subject: subject.clone(),
                    field: name,
                },
            );
            failed = true;
            continue;
        }

        fields.push(LocalizedFieldInfo {
            name,
            declared_type: field.ty.clone(),
            fallback: marker_args.fallback,
        });
    }

    if failed {
        return None;
    }
    if fields.is_empty() && !legacy {
        return None;
    }

    if !host.is_recognized_entity(item) {
        report(
            sink,
            subject.clone(),
            ExtractError::NotAnEntity { subject },
        );
        return None;
    }

    let table = match find_marker(&item.attrs, markers::ENTITY) {
        Some(attr) => match args::entity_args(attr) {
            Ok(entity_args) => entity_args.table,
            Err(source) => {
                report(
                    sink,
                    subject.clone(),
                    ExtractError::BadArguments {
                        marker: markers::ENTITY,
                        subject,
                        source,
                    },
                );
                return None;
            }
        },
        None => None,
    };

    Some(EntityModel {
        package: package.to_owned(),
        simple_name: item.ident.to_string(),
        table,
        fields,
    })
}

/// Localization markers anywhere but a struct field are placement
/// errors; everything else is left alone.
fn scan_misplaced(package: &str, item: &syn::Item, sink: &dyn DiagnosticSink) {
    let (name, attrs, placement): (String, &[syn::Attribute], &'static str) = match item {
        syn::Item::Const(item) => (item.ident.to_string(), &item.attrs, "a constant"),
        syn::Item::Enum(item) => {
            scan_enum(package, item, sink);
            return;
        }
        syn::Item::Fn(item) => (item.sig.ident.to_string(), &item.attrs, "a function"),
        syn::Item::Static(item) => (item.ident.to_string(), &item.attrs, "a static"),
        _ => return,
    };

    if let Some(marker) = stray_marker(attrs) {
        let subject = QualifiedName::new(package, name);
        report(
            sink,
            subject.clone(),
            ExtractError::Placement {
                marker,
                placement,
                subject,
            },
        );
    }
}

fn scan_enum(package: &str, item: &syn::ItemEnum, sink: &dyn DiagnosticSink) {
    let subject = QualifiedName::new(package, item.ident.to_string());

    if let Some(marker) = stray_marker(&item.attrs) {
        report(
            sink,
            subject.clone(),
            ExtractError::Placement {
                marker,
                placement: "an enum",
                subject: subject.clone(),
            },
        );
    }

    for variant in &item.variants {
        let marked = find_marker(&variant.attrs, markers::LOCALIZED).is_some()
            || variant
                .fields
                .iter()
                .any(|field| find_marker(&field.attrs, markers::LOCALIZED).is_some());
        if marked {
            report(
                sink,
                subject.clone(),
                ExtractError::Placement {
                    marker: markers::LOCALIZED,
                    placement: "an enum variant",
                    subject: subject.clone(),
                },
            );
        }
    }
}

fn stray_marker(attrs: &[syn::Attribute]) -> Option<&'static str> {
    [markers::LOCALIZED, markers::LOCALIZED_ENTITY]
        .into_iter()
        .find(|marker| find_marker(attrs, marker).is_some())
}

fn report(sink: &dyn DiagnosticSink, subject: QualifiedName, error: ExtractError) {
    let error = Error::from(error);
    sink.report(Diagnostic::new(error.severity(), error.to_string()).with_subject(subject));
}
