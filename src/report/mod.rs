//! Report classification and delivery.
//!
//! A report moves through `created -> classified -> suppressed | delivered`.
//! Classification reads the note sets and option flags on [`Config`];
//! delivery goes through the [`ReportHook`] injected when the configuration
//! is built.
//!
//! [`Config`]: crate::config::Config

mod center;
mod classify;
mod deliver;
mod error;
mod hook;
mod kind;
mod note_set;
mod record;
mod verbosity;

#[cfg(test)]
mod classify_test;
#[cfg(test)]
mod deliver_test;

pub use center::{ContextToken, ReportCenter};
pub use error::{RecoverableCompilationError, ReportError};
pub use hook::{Directive, ErrorHandling, ReportHook};
pub use kind::{ReportCategory, ReportKind, ReportSeverity, hint_kinds, warning_kinds};
pub use note_set::{NoteAxis, NoteSet, NoteSets};
pub use record::{
    DiagnosticDetail, InstantiationFrame, InternalDetail, NilCheckDetail, Report, ReportId,
    ReportPayload, StyleDetail, TraceDetail, UserDetail,
};
pub use verbosity::{MANDATORY_BASE, MAX_VERBOSITY, VerbosityTiers};
