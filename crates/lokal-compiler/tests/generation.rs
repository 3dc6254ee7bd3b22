//! Companion generation properties.

use std::collections::BTreeSet;

use lokal_compiler::generate::{GENERATED_HEADER, contract_unit, translation_unit};
use lokal_schema::{EntityModel, LocalizedFieldInfo, naming};
use proptest::prelude::*;
use quote::ToTokens;

fn model_with_fields(names: impl IntoIterator<Item = String>) -> EntityModel {
    let fields = names
        .into_iter()
        .map(|name| LocalizedFieldInfo {
            fallback: name.len() % 2 == 0,
            declared_type: syn::parse_quote!(String),
            name,
        })
        .collect();
    EntityModel {
        package: "shop".to_string(),
        simple_name: "Badge".to_string(),
        table: None,
        fields,
    }
}

fn field_names() -> impl Strategy<Value = BTreeSet<String>> {
    let name = "[a-z][a-z0-9]{2,8}".prop_filter("must be a usable field ident", |name| {
        syn::parse_str::<syn::Ident>(name).is_ok() && !naming::is_reserved_field(name)
    });
    prop::collection::btree_set(name, 1..5)
}

#[test]
fn badge_companions_have_the_expected_surface() {
    let model = model_with_fields(["name".to_string()]);

    let translation = translation_unit(&model);
    assert_eq!(translation.name.to_string(), "shop::BadgeTranslation");
    assert!(translation.source.starts_with(GENERATED_HEADER));

    let file = syn::parse_file(&translation.source).unwrap();
    let decl = file
        .items
        .iter()
        .find_map(|item| match item {
            syn::Item::Struct(decl) => Some(decl),
            _ => None,
        })
        .unwrap();
    assert_eq!(decl.ident, "BadgeTranslation");
    let entity_attr = decl
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("entity"))
        .unwrap();
    assert!(
        entity_attr
            .to_token_stream()
            .to_string()
            .contains("badge_translations")
    );

    let contract = contract_unit(&model);
    assert_eq!(contract.name.to_string(), "shop::BadgeLocalized");
    assert!(contract.source.starts_with(GENERATED_HEADER));
    assert!(syn::parse_file(&contract.source).is_ok());
}

proptest! {
    #[test]
    fn generation_is_deterministic(names in field_names()) {
        let model = model_with_fields(names);

        let translation_a = translation_unit(&model);
        let translation_b = translation_unit(&model);
        prop_assert_eq!(translation_a.source, translation_b.source);

        let contract_a = contract_unit(&model);
        let contract_b = contract_unit(&model);
        prop_assert_eq!(contract_a.source, contract_b.source);
    }

    #[test]
    fn generated_units_always_parse(names in field_names()) {
        let model = model_with_fields(names);

        prop_assert!(syn::parse_file(&translation_unit(&model).source).is_ok());
        prop_assert!(syn::parse_file(&contract_unit(&model).source).is_ok());
    }
}
