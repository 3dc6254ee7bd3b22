//! Diagnostic boundary.
//!
//! Engine logic never prints and never aborts on user-source problems;
//! every finding flows through a `DiagnosticSink` the host owns. Hosts
//! forward to their own reporting channel, tests capture with
//! `BufferSink`.

use lokal_schema::QualifiedName;
use serde::Serialize;
use std::{cell::RefCell, fmt};

///
/// Severity
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Severity {
    Error,
    Note,
    Warning,
}

impl Severity {
    /// Ordering weight; errors outrank warnings outrank notes.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Note => 0,
            Self::Warning => 1,
            Self::Error => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Error => "error",
            Self::Note => "note",
            Self::Warning => "warning",
        };
        f.write_str(label)
    }
}

///
/// Diagnostic
/// One structured finding, attributed to a declaration when one is
/// known.
///

#[derive(Clone, Debug, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub subject: Option<QualifiedName>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            subject: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    #[must_use]
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(Severity::Note, message)
    }

    #[must_use]
    pub fn with_subject(mut self, subject: QualifiedName) -> Self {
        self.subject = Some(subject);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subject {
            Some(subject) => write!(f, "{}: {} ({subject})", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

///
/// DiagnosticSink
///

pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

///
/// BufferSink
/// Collects diagnostics in arrival order, for hosts that flush at round
/// end and for tests.
///

#[derive(Debug, Default)]
pub struct BufferSink {
    entries: RefCell<Vec<Diagnostic>>,
}

impl BufferSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything collected so far.
    #[must_use]
    pub fn take(&self) -> Vec<Diagnostic> {
        self.entries.take()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.severity == severity)
            .count()
    }

    /// Highest-ranked severity seen, if anything was reported.
    #[must_use]
    pub fn worst_severity(&self) -> Option<Severity> {
        self.entries
            .borrow()
            .iter()
            .map(|entry| entry.severity)
            .max_by_key(|severity| severity.rank())
    }
}

impl DiagnosticSink for BufferSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.entries.borrow_mut().push(diagnostic);
    }
}
