//! Accessor upserts on the entity's inherent impl block.
//!
//! Hand-written stubs with a matching name and arity are overwritten
//! rather than duplicated, so an author can pre-declare an accessor to
//! quiet an IDE and still get the real body.

use lokal_schema::{EntityModel, LocalizedFieldInfo, naming};
use quote::format_ident;

use crate::helper::is_inherent_impl;

/// How much of a colliding method an upsert may overwrite. Getters
/// keep the author's signature (only the body is replaced); setters
/// also take over the parameter list, since a stub usually declares
/// the value parameter loosely.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AccessorKind {
    Getter,
    Setter,
}

struct Accessor {
    kind: AccessorKind,
    method: syn::ImplItemFn,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct MethodsDelta {
    pub added: usize,
    pub replaced: usize,
}

enum Upsert {
    Missing,
    Replaced,
    Unchanged,
}

/// Insert or overwrite the full accessor set for `model` on the
/// entity's inherent impl, creating the impl block when the
/// declaration has none.
pub(super) fn upsert_accessors(file: &mut syn::File, model: &EntityModel) -> MethodsDelta {
    ensure_inherent_impl(file, &model.simple_name);

    let mut delta = MethodsDelta::default();
    for accessor in generated_accessors(model) {
        match try_replace(file, &model.simple_name, &accessor) {
            Upsert::Unchanged => {}
            Upsert::Replaced => delta.replaced += 1,
            Upsert::Missing => {
                append_method(file, &model.simple_name, accessor.method);
                delta.added += 1;
            }
        }
    }

    delta
}

fn generated_accessors(model: &EntityModel) -> Vec<Accessor> {
    let mut accessors = Vec::new();
    for info in &model.fields {
        accessors.extend(field_accessors(model, info));
    }
    accessors.extend(map_accessors(model));
    accessors
}

/// The four per-field accessors. Bodies qualify every runtime path so
/// they work regardless of what the unit imports; signatures use the
/// bare names the import pass guarantees.
fn field_accessors(model: &EntityModel, info: &LocalizedFieldInfo) -> Vec<Accessor> {
    let entity_ident = format_ident!("{}", model.simple_name);
    let translation_ident = format_ident!("{}", model.translation_name().name);
    let field_ident = format_ident!("{}", info.name);
    let getter = format_ident!("{}", naming::getter(&info.name));
    let getter_in = format_ident!("{}", naming::getter_in(&info.name));
    let setter = format_ident!("{}", naming::setter(&info.name));
    let setter_in = format_ident!("{}", naming::setter_in(&info.name));
    let ty = &info.declared_type;

    vec![
        Accessor {
            kind: AccessorKind::Getter,
            method: syn::parse_quote! {
                pub fn #getter(&self) -> Option<&#ty> {
                    let locale = ::lokal_runtime::current_locale();
                    self.#getter_in(&locale)
                }
            },
        },
        Accessor {
            kind: AccessorKind::Getter,
            method: syn::parse_quote! {
                pub fn #getter_in(&self, locale: &Locale) -> Option<&#ty> {
                    let entry = self.translations.as_ref()?.get(locale.language())?;
                    entry.#field_ident.as_ref()
                }
            },
        },
        Accessor {
            kind: AccessorKind::Setter,
            method: syn::parse_quote! {
                pub fn #setter(&mut self, value: #ty) {
                    let locale = ::lokal_runtime::current_locale();
                    self.#setter_in(value, &locale);
                }
            },
        },
        Accessor {
            kind: AccessorKind::Setter,
            method: syn::parse_quote! {
                pub fn #setter_in(&mut self, value: #ty, locale: &Locale) {
                    let parent = ::lokal_runtime::ParentRef::<#entity_ident>::to(self);
                    let language = locale.language().to_string();
                    let map = self
                        .translations
                        .get_or_insert_with(::lokal_runtime::TranslationMap::new);
                    let entry = map.entry_for(&language, || #translation_ident {
                        record: ::lokal_runtime::TranslationRecord::for_language(&language),
                        parent,
                        ..::std::default::Default::default()
                    });
                    entry.#field_ident = Some(value);
                }
            },
        },
    ]
}

fn map_accessors(model: &EntityModel) -> Vec<Accessor> {
    let translation_ident = format_ident!("{}", model.translation_name().name);
    let getter = format_ident!("{}", naming::TRANSLATIONS_FIELD);
    let setter = format_ident!("{}", naming::TRANSLATIONS_SETTER);

    vec![
        Accessor {
            kind: AccessorKind::Getter,
            method: syn::parse_quote! {
                pub fn #getter(&self) -> Option<&TranslationMap<#translation_ident>> {
                    self.translations.as_ref()
                }
            },
        },
        Accessor {
            kind: AccessorKind::Setter,
            method: syn::parse_quote! {
                pub fn #setter(&mut self, translations: Option<TranslationMap<#translation_ident>>) {
                    self.translations = translations;
                }
            },
        },
    ]
}

/// Guarantee one `impl Entity {}` exists, directly after the struct
/// declaration when possible.
fn ensure_inherent_impl(file: &mut syn::File, entity: &str) {
    let exists = file
        .items
        .iter()
        .any(|item| is_inherent_impl(item, entity));
    if exists {
        return;
    }

    let ident = format_ident!("{entity}");
    let block: syn::Item = syn::parse_quote!(impl #ident {});
    let struct_index = file.items.iter().position(|item| {
        matches!(item, syn::Item::Struct(decl) if decl.ident == entity)
    });
    match struct_index {
        Some(index) => file.items.insert(index + 1, block),
        None => file.items.push(block),
    }
}

/// Find a method with the same name and arity in any inherent impl and
/// overwrite it. Arity includes the receiver, so a stray `name(&self,
/// extra: u8)` is left alone rather than clobbered.
fn try_replace(file: &mut syn::File, entity: &str, accessor: &Accessor) -> Upsert {
    for item in &mut file.items {
        if !is_inherent_impl(item, entity) {
            continue;
        }
        let syn::Item::Impl(block) = item else { continue };
        for impl_item in &mut block.items {
            let syn::ImplItem::Fn(existing) = impl_item else {
                continue;
            };
            if existing.sig.ident != accessor.method.sig.ident
                || existing.sig.inputs.len() != accessor.method.sig.inputs.len()
            {
                continue;
            }

            let mut patched = existing.clone();
            patched.block = accessor.method.block.clone();
            if accessor.kind == AccessorKind::Setter {
                patched.sig.inputs = accessor.method.sig.inputs.clone();
                patched.sig.output = accessor.method.sig.output.clone();
            }

            if *existing == patched {
                return Upsert::Unchanged;
            }
            *existing = patched;
            return Upsert::Replaced;
        }
    }

    Upsert::Missing
}

fn append_method(file: &mut syn::File, entity: &str, method: syn::ImplItemFn) {
    let index = file
        .items
        .iter()
        .position(|item| is_inherent_impl(item, entity));
    if let Some(index) = index
        && let syn::Item::Impl(block) = &mut file.items[index]
    {
        block.items.push(syn::ImplItem::Fn(method));
    }
}
