//! The `{Entity}Translation` companion unit.

use crate::generate::GeneratedUnit;
use lokal_schema::{EntityModel, naming};
use quote::{format_ident, quote};

/// Build the translation companion for `model`: one `Option` slot per
/// localized field, the shared record as identity, and a typed
/// back-reference to the owner.
#[must_use]
pub fn translation_unit(model: &EntityModel) -> GeneratedUnit {
    let entity_ident = format_ident!("{}", model.simple_name);
    let translation_ident = format_ident!("{}", naming::translation_type_name(&model.simple_name));
    let table = naming::translation_table_name(&model.table_base());

    let slots = model.fields.iter().map(|field| {
        let ident = format_ident!("{}", field.name);
        let ty = &field.declared_type;
        quote! {
            pub #ident: Option<#ty>,
        }
    });

    let type_doc = format!(
        "Translations of [`{}`], one row per locale.",
        model.simple_name
    );

    let tokens = quote! {
        use lokal_runtime::{ParentRef, Translation, TranslationRecord};
        use serde::{Deserialize, Serialize};

        #[doc = #type_doc]
        #[derive(Clone, Debug, Default, Deserialize, Serialize)]
        #[entity(table = #table)]
        pub struct #translation_ident {
            pub record: TranslationRecord,
            #[serde(skip)]
            pub parent: ParentRef<#entity_ident>,
            #(#slots)*
        }

        impl Translation for #translation_ident {
            fn record(&self) -> &TranslationRecord {
                &self.record
            }

            fn record_mut(&mut self) -> &mut TranslationRecord {
                &mut self.record
            }
        }

        impl PartialEq for #translation_ident {
            fn eq(&self, other: &Self) -> bool {
                self.record == other.record
            }
        }

        impl Eq for #translation_ident {}

        impl ::std::hash::Hash for #translation_ident {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                ::std::hash::Hash::hash(&self.record, state);
            }
        }
    };

    GeneratedUnit::render(model.translation_name(), tokens)
}
