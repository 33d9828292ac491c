use thiserror::Error;

/// Raised when an error report crosses the error threshold or the caller
/// asked for raise-on-error. The driver catches it to stop the current
/// compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("compilation stopped after {errors} error(s)")]
pub struct RecoverableCompilationError {
    pub errors: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error(transparent)]
    Recoverable(#[from] RecoverableCompilationError),
    /// The driver should exit with `exit_code`.
    #[error("compilation aborted (exit code {exit_code})")]
    Aborted { exit_code: i32 },
}

impl ReportError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ReportError::Recoverable(_))
    }
}
