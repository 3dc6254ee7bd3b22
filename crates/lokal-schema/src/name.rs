use serde::Serialize;
use std::fmt;

///
/// QualifiedName
/// `package::Name` identity of one declaration. Companion generation is
/// keyed on these, so ordering and equality must stay cheap and total.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct QualifiedName {
    pub package: String,
    pub name: String,
}

impl QualifiedName {
    #[must_use]
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Name of a sibling declaration in the same package.
    #[must_use]
    pub fn sibling(&self, name: impl Into<String>) -> Self {
        Self {
            package: self.package.clone(),
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}::{}", self.package, self.name)
        }
    }
}
