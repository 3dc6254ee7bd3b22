//! In-place mutation of entity declarations.
//!
//! Every edit is idempotent. Running the full pass twice over the same
//! tree yields a no-op delta, so re-entrant build pipelines and
//! incremental rebuilds never stack duplicate fields, imports, or
//! methods.

mod fields;
mod imports;
mod methods;

use lokal_schema::EntityModel;

use crate::diag::DiagnosticSink;
use crate::error::MutateError;
use crate::helper::declares_struct;

///
/// MutationDelta
/// What one mutation pass actually changed.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MutationDelta {
    pub imports_added: usize,
    pub fields_marked_transient: usize,
    pub map_field_injected: bool,
    pub methods_added: usize,
    pub methods_replaced: usize,
}

impl MutationDelta {
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.imports_added == 0
            && self.fields_marked_transient == 0
            && !self.map_field_injected
            && self.methods_added == 0
            && self.methods_replaced == 0
    }
}

/// Rewrite the unit declaring `model`'s entity: imports first, then the
/// struct's fields, then the accessor set.
///
/// Imports are inserted before the struct is located mutably because
/// insertion shifts item indices.
pub fn apply(
    file: &mut syn::File,
    model: &EntityModel,
    sink: &dyn DiagnosticSink,
) -> Result<MutationDelta, MutateError> {
    if !declares_struct(file, &model.simple_name) {
        return Err(MutateError::DeclarationMissing(model.qualified_name()));
    }

    let mut delta = MutationDelta {
        imports_added: imports::ensure_runtime_imports(file),
        ..MutationDelta::default()
    };

    for item in &mut file.items {
        let syn::Item::Struct(decl) = item else { continue };
        if decl.ident != model.simple_name.as_str() {
            continue;
        }
        delta.fields_marked_transient = fields::mark_transient(decl, model, sink);
        delta.map_field_injected = fields::inject_translation_map(decl, model);
        break;
    }

    let methods = methods::upsert_accessors(file, model);
    delta.methods_added = methods.added;
    delta.methods_replaced = methods.replaced;

    Ok(delta)
}
