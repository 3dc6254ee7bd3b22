use crate::{QualifiedName, naming};

///
/// LocalizedFieldInfo
/// One localizable field as extracted from its declaration. Immutable
/// once built; re-extraction of unchanged source yields an equal value.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocalizedFieldInfo {
    pub name: String,
    pub declared_type: syn::Type,
    pub fallback: bool,
}

///
/// EntityModel
/// Everything generation and mutation need to know about one entity:
/// its identity, its table override, and its localizable fields in
/// declaration order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityModel {
    pub package: String,
    pub simple_name: String,
    pub table: Option<String>,
    pub fields: Vec<LocalizedFieldInfo>,
}

impl EntityModel {
    #[must_use]
    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::new(&self.package, &self.simple_name)
    }

    /// Qualified name of the companion translation type.
    #[must_use]
    pub fn translation_name(&self) -> QualifiedName {
        QualifiedName::new(
            &self.package,
            naming::translation_type_name(&self.simple_name),
        )
    }

    /// Qualified name of the accessor-contract trait.
    #[must_use]
    pub fn contract_name(&self) -> QualifiedName {
        QualifiedName::new(&self.package, naming::contract_type_name(&self.simple_name))
    }

    /// Resolved base table name: the explicit override when declared,
    /// the snake-cased entity name otherwise.
    #[must_use]
    pub fn table_base(&self) -> String {
        self.table
            .clone()
            .unwrap_or_else(|| naming::entity_table_name(&self.simple_name))
    }
}

///
/// PendingMutation
/// Mutation work parked until the companion type becomes resolvable.
///

#[derive(Clone, Debug)]
pub struct PendingMutation {
    pub model: EntityModel,
    pub queued_in_round: u32,
}
