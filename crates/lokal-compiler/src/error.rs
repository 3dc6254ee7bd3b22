//! Failure taxonomy.
//!
//! Every failure is scoped to one entity or one unit and surfaces as a
//! diagnostic at the severity `Error::severity` assigns; none of them
//! stop the build.

use crate::{diag::Severity, host::TreeHandle};
use lokal_schema::QualifiedName;
use thiserror::Error as ThisError;

///
/// ExtractError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum ExtractError {
    #[error("cannot read `#[{marker}]` arguments on `{subject}`: {source}")]
    BadArguments {
        marker: &'static str,
        subject: QualifiedName,
        source: darling::Error,
    },

    #[error("`{subject}` carries localization markers but the host does not recognize it as an entity")]
    NotAnEntity { subject: QualifiedName },

    #[error("`#[{marker}]` is not allowed on {placement} (`{subject}`)")]
    Placement {
        marker: &'static str,
        placement: &'static str,
        subject: QualifiedName,
    },

    #[error("localized field `{field}` of `{subject}` clashes with a name the generated code reserves; rename it")]
    ReservedField {
        subject: QualifiedName,
        field: String,
    },

    #[error("localization markers need named struct fields; `{subject}` does not have named fields")]
    UnnamedFields { subject: QualifiedName },
}

///
/// EmitError
///

#[derive(Debug, ThisError)]
#[error("failed to write generated unit `{unit}`: {reason}")]
pub struct EmitError {
    pub unit: QualifiedName,
    pub reason: String,
}

///
/// HostError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum HostError {
    #[error("host rejected the tree edit: {0}")]
    EditRejected(String),

    #[error("stale or unknown tree handle {0:?}")]
    UnknownHandle(TreeHandle),
}

///
/// MutateError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum MutateError {
    #[error("declaration `{0}` not found in its compilation unit")]
    DeclarationMissing(QualifiedName),

    #[error(transparent)]
    Host(#[from] HostError),
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Mutate(#[from] MutateError),
}

impl Error {
    /// Severity this failure is reported at. Extraction and emission
    /// problems are errors; anything that only degrades to
    /// generation-only output is a warning.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Emit(_) | Self::Extract(_) => Severity::Error,
            Self::Host(_) | Self::Mutate(_) => Severity::Warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_mapping_follows_the_failure_class() {
        let emit = Error::from(EmitError {
            unit: QualifiedName::new("shop", "BadgeTranslation"),
            reason: "disk full".to_owned(),
        });
        assert_eq!(emit.severity(), Severity::Error);

        let extract = Error::from(ExtractError::NotAnEntity {
            subject: QualifiedName::new("shop", "Badge"),
        });
        assert_eq!(extract.severity(), Severity::Error);

        let host = Error::from(HostError::EditRejected("read-only trees".to_owned()));
        assert_eq!(host.severity(), Severity::Warning);

        let mutate = Error::from(MutateError::DeclarationMissing(QualifiedName::new(
            "shop", "Badge",
        )));
        assert_eq!(mutate.severity(), Severity::Warning);
    }

    #[test]
    fn messages_name_the_subject() {
        let error = ExtractError::ReservedField {
            subject: QualifiedName::new("shop", "Badge"),
            field: "translations".to_owned(),
        };
        let text = error.to_string();
        assert!(text.contains("shop::Badge"));
        assert!(text.contains("translations"));
    }
}
