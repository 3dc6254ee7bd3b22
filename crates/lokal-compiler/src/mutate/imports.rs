//! Import management for mutated units.

use quote::format_ident;

/// Names injected signatures reference bare; bodies use fully qualified
/// paths and need nothing in scope.
const RUNTIME_IMPORTS: [&str; 2] = ["Locale", "TranslationMap"];

/// Ensure one `use lokal_runtime::..;` item per missing name. New items
/// land right after the last existing `use`, else before the first
/// item. Returns how many imports were added.
pub(super) fn ensure_runtime_imports(file: &mut syn::File) -> usize {
    let missing: Vec<&str> = RUNTIME_IMPORTS
        .into_iter()
        .filter(|name| !imports_name(file, name))
        .collect();
    if missing.is_empty() {
        return 0;
    }

    let added = missing.len();
    let insert_at = insertion_index(file);
    for (offset, name) in missing.into_iter().enumerate() {
        let ident = format_ident!("{name}");
        let item: syn::Item = syn::parse_quote! {
            use lokal_runtime::#ident;
        };
        file.items.insert(insert_at + offset, item);
    }

    added
}

fn imports_name(file: &syn::File, name: &str) -> bool {
    file.items.iter().any(|item| match item {
        syn::Item::Use(item) => tree_imports(&item.tree, false, name),
        _ => false,
    })
}

/// Does this use-tree bring `name` into scope from `lokal_runtime`?
/// Renames do not count; the injected code needs the bare name.
fn tree_imports(tree: &syn::UseTree, in_runtime: bool, name: &str) -> bool {
    match tree {
        syn::UseTree::Path(path) => {
            let entered = in_runtime || path.ident == "lokal_runtime";
            entered && tree_imports(&path.tree, true, name)
        }
        syn::UseTree::Name(leaf) => in_runtime && leaf.ident == name,
        syn::UseTree::Glob(_) => in_runtime,
        syn::UseTree::Group(group) => group
            .items
            .iter()
            .any(|tree| tree_imports(tree, in_runtime, name)),
        syn::UseTree::Rename(_) => false,
    }
}

fn insertion_index(file: &syn::File) -> usize {
    let mut last_use = None;
    for (index, item) in file.items.iter().enumerate() {
        if matches!(item, syn::Item::Use(_)) {
            last_use = Some(index);
        }
    }
    last_use.map_or(0, |index| index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> syn::File {
        syn::parse_file(source).expect("test source should parse")
    }

    fn use_items(file: &syn::File) -> usize {
        file.items
            .iter()
            .filter(|item| matches!(item, syn::Item::Use(_)))
            .count()
    }

    #[test]
    fn adds_both_names_before_the_first_item_when_no_uses_exist() {
        let mut file = parse("pub struct Badge {}");
        assert_eq!(ensure_runtime_imports(&mut file), 2);

        assert!(matches!(file.items[0], syn::Item::Use(_)));
        assert!(matches!(file.items[1], syn::Item::Use(_)));
        assert!(matches!(file.items[2], syn::Item::Struct(_)));
    }

    #[test]
    fn inserts_after_the_last_existing_use() {
        let mut file = parse(
            "use serde::Serialize;\nuse std::fmt;\npub struct Badge {}\nuse std::collections::BTreeMap;",
        );
        assert_eq!(ensure_runtime_imports(&mut file), 2);

        // after the trailing use, not the leading pair
        assert!(matches!(file.items[4], syn::Item::Use(_)));
        assert!(matches!(file.items[5], syn::Item::Use(_)));
        assert!(matches!(file.items[2], syn::Item::Struct(_)));
    }

    #[test]
    fn present_names_are_not_duplicated() {
        let mut file = parse("use lokal_runtime::Locale;\npub struct Badge {}");
        assert_eq!(ensure_runtime_imports(&mut file), 1);
        assert_eq!(use_items(&file), 2);

        // second pass has nothing left to add
        assert_eq!(ensure_runtime_imports(&mut file), 0);
        assert_eq!(use_items(&file), 2);
    }

    #[test]
    fn grouped_and_glob_imports_count_as_present() {
        let mut grouped = parse("use lokal_runtime::{Locale, TranslationMap};\nstruct Badge {}");
        assert_eq!(ensure_runtime_imports(&mut grouped), 0);

        let mut globbed = parse("use lokal_runtime::*;\nstruct Badge {}");
        assert_eq!(ensure_runtime_imports(&mut globbed), 0);
    }

    #[test]
    fn renamed_imports_do_not_count() {
        let mut file = parse("use lokal_runtime::Locale as Lang;\nstruct Badge {}");
        assert_eq!(ensure_runtime_imports(&mut file), 2);
    }

    #[test]
    fn other_crates_locale_does_not_count() {
        let mut file = parse("use icu::Locale;\nstruct Badge {}");
        assert_eq!(ensure_runtime_imports(&mut file), 2);
    }
}
