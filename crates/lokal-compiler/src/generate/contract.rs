//! The `{Entity}Localized` accessor-contract unit.
//!
//! The contract is documentation and typing only; nothing implements it
//! mechanically. It exists so readers and tooling can see the accessor
//! surface an entity gains without opening the mutated declaration.

use crate::generate::GeneratedUnit;
use lokal_schema::{EntityModel, naming};
use quote::{format_ident, quote};

/// Build the accessor contract for `model`: the four locale-aware
/// methods per field plus the translation-map pair.
#[must_use]
pub fn contract_unit(model: &EntityModel) -> GeneratedUnit {
    let contract_ident = format_ident!("{}", naming::contract_type_name(&model.simple_name));
    let translation_ident = format_ident!("{}", naming::translation_type_name(&model.simple_name));

    let methods = model.fields.iter().map(|field| {
        let ty = &field.declared_type;
        let getter = format_ident!("{}", naming::getter(&field.name));
        let getter_in = format_ident!("{}", naming::getter_in(&field.name));
        let setter = format_ident!("{}", naming::setter(&field.name));
        let setter_in = format_ident!("{}", naming::setter_in(&field.name));
        let fallback_doc = if field.fallback {
            format!(
                "Reads of `{}` fall back to the default locale when the requested one has no value.",
                field.name
            )
        } else {
            format!(
                "Reads of `{}` return `None` when the requested locale has no value; no fallback applies.",
                field.name
            )
        };
        quote! {
            #[doc = #fallback_doc]
            fn #getter(&self) -> Option<&#ty>;

            fn #getter_in(&self, locale: &Locale) -> Option<&#ty>;

            fn #setter(&mut self, value: #ty);

            fn #setter_in(&mut self, value: #ty, locale: &Locale);
        }
    });

    let contract_doc = format!("Locale-aware accessor surface of [`{}`].", model.simple_name);

    let tokens = quote! {
        use lokal_runtime::{Locale, TranslationMap};

        #[doc = #contract_doc]
        pub trait #contract_ident {
            #(#methods)*

            fn translations(&self) -> Option<&TranslationMap<#translation_ident>>;

            fn set_translations(&mut self, translations: Option<TranslationMap<#translation_ident>>);
        }
    };

    GeneratedUnit::render(model.contract_name(), tokens)
}
