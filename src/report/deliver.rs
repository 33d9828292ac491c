use crate::config::Config;
use crate::location::SourceLocation;

use super::{
    error::{RecoverableCompilationError, ReportError},
    hook::{Directive, ErrorHandling},
    kind::{ReportKind, ReportSeverity},
    record::{Report, ReportId},
};

impl Config {
    /// Hands an enabled report to the hook and returns its directive
    /// unchanged. The hook gets the configuration back mutably and may
    /// report further diagnostics while this one is being delivered.
    ///
    /// Panics when no hook is installed or the report has no kind.
    pub fn deliver(&mut self, report: &Report) -> Directive {
        require_kind(report);
        let Some(hook) = self.hook.clone() else {
            panic!("no report hook installed, cannot deliver {:?}", report.kind());
        };
        hook.handle(self, report)
    }

    pub fn report(&mut self, report: Report) -> Result<Directive, ReportError> {
        self.report_with(report, ErrorHandling::Nothing)
    }

    pub fn report_with(
        &mut self,
        mut report: Report,
        handling: ErrorHandling,
    ) -> Result<Directive, ReportError> {
        require_kind(&report);
        let id = self.reports.prepare(&mut report);
        if !self.reports.can_report(id) {
            tracing::debug!(%id, "report already delivered");
            return Ok(Directive::DoNothing);
        }
        self.dispatch(id, &report, handling)
    }

    /// Replays a postponed report. Each id reaches the hook at most once;
    /// later replays return `DoNothing`.
    pub fn report_id(&mut self, id: ReportId, handling: ErrorHandling) -> Result<Directive, ReportError> {
        if !self.reports.can_report(id) {
            return Ok(Directive::DoNothing);
        }
        let Some(report) = self.reports.get_postponed(id).cloned() else {
            panic!("report {id} was never postponed");
        };
        require_kind(&report);
        self.dispatch(id, &report, handling)
    }

    pub fn postpone(&mut self, report: Report) -> ReportId {
        self.reports.add_postponed(report)
    }

    fn dispatch(
        &mut self,
        id: ReportId,
        report: &Report,
        handling: ErrorHandling,
    ) -> Result<Directive, ReportError> {
        self.reports.mark_written(id);

        if !self.is_enabled(report) {
            tracing::debug!(%id, kind = ?report.kind(), "report suppressed");
            return Ok(Directive::DoNothing);
        }

        let severity = self.severity(report);
        let directive = self.deliver(report);
        tracing::debug!(%id, kind = ?report.kind(), ?severity, ?directive, "report delivered");
        self.count(severity);

        let action = match directive {
            Directive::Default => self.error_action(severity, handling),
            other => other,
        };
        match action {
            Directive::Abort => {
                self.counters.exit_code = self.counters.exit_code.max(1);
                Err(ReportError::Aborted {
                    exit_code: self.counters.exit_code,
                })
            }
            Directive::Raise => {
                tracing::debug!(errors = self.counters.errors, "raising recoverable compilation error");
                Err(RecoverableCompilationError {
                    errors: self.counters.errors,
                }
                .into())
            }
            _ => Ok(directive),
        }
    }

    fn count(&mut self, severity: ReportSeverity) {
        match severity {
            ReportSeverity::Error => {
                self.counters.errors += 1;
                self.counters.exit_code = 1;
            }
            ReportSeverity::Warning => self.counters.warnings += 1,
            ReportSeverity::Hint => self.counters.hints += 1,
            _ => {}
        }
    }

    /// What a `Default` directive means for a report of `severity`.
    fn error_action(&self, severity: ReportSeverity, handling: ErrorHandling) -> Directive {
        match severity {
            ReportSeverity::Fatal => Directive::Abort,
            ReportSeverity::Error => {
                if self.counters.errors >= self.counters.error_max {
                    Directive::Raise
                } else {
                    match handling {
                        ErrorHandling::Abort if !self.options.is_ide_tooling() => Directive::Abort,
                        ErrorHandling::Raise => Directive::Raise,
                        _ => Directive::Default,
                    }
                }
            }
            _ => Directive::Default,
        }
    }

    /// Runs `f` with `(location, symbol)` pushed on the instantiation
    /// context. Reports created inside carry the frame in their trail.
    pub fn with_instantiation<R>(
        &mut self,
        location: SourceLocation,
        symbol: impl Into<String>,
        f: impl FnOnce(&mut Config) -> R,
    ) -> R {
        let token = self.reports.push_context(location, symbol);
        let result = f(self);
        self.reports.pop_context(token);
        result
    }

    pub fn assert_context_balanced(&self) {
        self.reports.assert_balanced();
    }

    /// Renders a trail as `file(line, col) symbol` lines, innermost last.
    pub fn render_trail(&self, report: &Report) -> Vec<String> {
        let full = self.options.list_full_paths();
        report
            .trail()
            .iter()
            .map(|frame| format!("{} {}", self.files.format_location(frame.location, full), frame.symbol))
            .collect()
    }
}

fn require_kind(report: &Report) {
    if report.kind() == ReportKind::Unset {
        panic!("delivered a report without a kind at {:?}", report.location());
    }
}
