//! Small syn-tree probes shared across the engine.

/// First attribute whose path is exactly `name`.
pub(crate) fn find_marker<'a>(
    attrs: &'a [syn::Attribute],
    name: &str,
) -> Option<&'a syn::Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

/// Does `file` declare a struct called `name` at its top level?
pub(crate) fn declares_struct(file: &syn::File, name: &str) -> bool {
    file.items
        .iter()
        .any(|item| matches!(item, syn::Item::Struct(item) if item.ident == name))
}

/// Is `item` an inherent impl block for the type `name`?
pub(crate) fn is_inherent_impl(item: &syn::Item, name: &str) -> bool {
    let syn::Item::Impl(block) = item else {
        return false;
    };
    block.trait_.is_none()
        && matches!(block.self_ty.as_ref(), syn::Type::Path(path) if path.path.is_ident(name))
}
