//! Build-time localization engine.
//!
//! Takes persistent entity declarations whose fields carry
//! localization markers and, over compilation rounds, produces for
//! each entity a translation companion type, an accessor contract
//! trait, and an in-place rewrite of the declaration itself. The
//! engine runs against a [`Host`] capability and degrades to
//! generation-only output on hosts that cannot mutate trees.
//!
//! ## Crate layout
//!
//! - `diag`: severity model and diagnostic sinks
//! - `error`: failure taxonomy and its severity mapping
//! - `extract`: marker scanning and entity model extraction
//! - `generate`: companion unit synthesis
//! - `host`: build-environment capability trait plus the in-memory host
//! - `mutate`: idempotent in-place declaration rewriting
//! - `round`: session state machine and round scheduling

mod helper;

pub mod diag;
pub mod error;
pub mod extract;
pub mod generate;
pub mod host;
pub mod mutate;
pub mod round;

pub use diag::{BufferSink, Diagnostic, DiagnosticSink, Severity};
pub use error::{EmitError, Error, ExtractError, HostError, MutateError};
pub use generate::GeneratedUnit;
pub use host::{Host, MemoryHost, TreeHandle, TypeToken, run_build};
pub use round::{BuildSession, EntityState, RoundReport, RoundUnit};
