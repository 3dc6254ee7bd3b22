//! Field edits on the entity struct.

use lokal_schema::{EntityModel, markers, naming};
use quote::format_ident;

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::helper::find_marker;

/// Tag every localized field `#[transient]` so the persistence layer
/// stops mapping the raw column. Already-tagged fields are left alone.
/// Returns how many attributes were added.
pub(super) fn mark_transient(
    item: &mut syn::ItemStruct,
    model: &EntityModel,
    sink: &dyn DiagnosticSink,
) -> usize {
    let syn::Fields::Named(named) = &mut item.fields else {
        return 0;
    };

    let mut marked = 0;
    for info in &model.fields {
        let Some(field) = named
            .named
            .iter_mut()
            .find(|field| field.ident.as_ref().is_some_and(|id| *id == info.name))
        else {
            sink.report(
                Diagnostic::warning(format!(
                    "localized field `{}` disappeared before mutation; leaving it untouched",
                    info.name
                ))
                .with_subject(model.qualified_name()),
            );
            continue;
        };

        if find_marker(&field.attrs, markers::TRANSIENT).is_some() {
            continue;
        }
        field.attrs.push(syn::parse_quote!(#[transient]));
        marked += 1;
    }

    marked
}

/// Insert the private translation-map field at the top of the struct.
/// A field already named `translations` means a prior pass (or the
/// author) got there first; nothing is added. Returns whether the
/// field was injected.
pub(super) fn inject_translation_map(item: &mut syn::ItemStruct, model: &EntityModel) -> bool {
    let syn::Fields::Named(named) = &mut item.fields else {
        return false;
    };

    let present = named.named.iter().any(|field| {
        field
            .ident
            .as_ref()
            .is_some_and(|id| *id == naming::TRANSLATIONS_FIELD)
    });
    if present {
        return false;
    }

    let translation_ident = format_ident!("{}", model.translation_name().name);
    let field: syn::Field = syn::parse_quote! {
        #[serde(skip)]
        translations: Option<TranslationMap<#translation_ident>>
    };
    named.named.insert(0, field);

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::BufferSink;
    use lokal_schema::LocalizedFieldInfo;

    fn badge_model() -> EntityModel {
        EntityModel {
            package: "shop".to_string(),
            simple_name: "Badge".to_string(),
            table: None,
            fields: vec![LocalizedFieldInfo {
                name: "name".to_string(),
                declared_type: syn::parse_quote!(String),
                fallback: true,
            }],
        }
    }

    fn badge_struct(source: &str) -> syn::ItemStruct {
        syn::parse_str(source).expect("test struct should parse")
    }

    #[test]
    fn marks_localized_fields_transient_once() {
        let mut item = badge_struct("pub struct Badge { pub id: i64, pub name: String }");
        let sink = BufferSink::new();

        assert_eq!(mark_transient(&mut item, &badge_model(), &sink), 1);
        assert_eq!(mark_transient(&mut item, &badge_model(), &sink), 0);

        let syn::Fields::Named(named) = &item.fields else {
            panic!("expected named fields");
        };
        let name = named.named.iter().find(|f| f.ident.as_ref().unwrap() == "name").unwrap();
        let transient = name
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("transient"))
            .count();
        assert_eq!(transient, 1);
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn missing_field_warns_and_moves_on() {
        let mut item = badge_struct("pub struct Badge { pub id: i64 }");
        let sink = BufferSink::new();

        assert_eq!(mark_transient(&mut item, &badge_model(), &sink), 0);

        let diagnostics = sink.take();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("disappeared before mutation"));
    }

    #[test]
    fn injects_private_map_field_at_the_front() {
        let mut item = badge_struct("pub struct Badge { pub id: i64, pub name: String }");

        assert!(inject_translation_map(&mut item, &badge_model()));

        let syn::Fields::Named(named) = &item.fields else {
            panic!("expected named fields");
        };
        let first = named.named.first().unwrap();
        assert_eq!(first.ident.as_ref().unwrap(), "translations");
        assert!(matches!(first.vis, syn::Visibility::Inherited));
        assert!(first.attrs.iter().any(|attr| attr.path().is_ident("serde")));
    }

    #[test]
    fn existing_map_field_is_not_duplicated() {
        let mut item = badge_struct(
            "pub struct Badge { translations: Option<TranslationMap<BadgeTranslation>>, pub name: String }",
        );

        assert!(!inject_translation_map(&mut item, &badge_model()));

        let syn::Fields::Named(named) = &item.fields else {
            panic!("expected named fields");
        };
        assert_eq!(named.named.len(), 2);
    }
}
