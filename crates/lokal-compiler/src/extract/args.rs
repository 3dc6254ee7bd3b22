use darling::FromMeta;

///
/// LocalizedArgs
/// Arguments of the `#[localized]` field marker.
///

#[derive(Clone, Debug, FromMeta)]
#[darling(default)]
pub struct LocalizedArgs {
    pub fallback: bool,
}

impl Default for LocalizedArgs {
    fn default() -> Self {
        // reads fall back to the default locale unless opted out
        Self { fallback: true }
    }
}

///
/// EntityArgs
/// Arguments of the persistence `#[entity]` marker. Only `table` is
/// read here; unknown arguments belong to the storage layer and pass
/// through untouched.
///

#[derive(Clone, Debug, Default, FromMeta)]
#[darling(default, allow_unknown_fields)]
pub struct EntityArgs {
    pub table: Option<String>,
}

/// Parse `#[localized]` in either its bare or argument form.
pub(crate) fn localized_args(attr: &syn::Attribute) -> Result<LocalizedArgs, darling::Error> {
    match &attr.meta {
        syn::Meta::Path(_) => Ok(LocalizedArgs::default()),
        meta => LocalizedArgs::from_meta(meta),
    }
}

/// Parse `#[entity]` in either its bare or argument form.
pub(crate) fn entity_args(attr: &syn::Attribute) -> Result<EntityArgs, darling::Error> {
    match &attr.meta {
        syn::Meta::Path(_) => Ok(EntityArgs::default()),
        meta => EntityArgs::from_meta(meta),
    }
}
