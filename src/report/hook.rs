use crate::config::Config;

use super::record::Report;

/// What the delivery hook wants done with a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Directive {
    /// Let the error-action table decide.
    #[default]
    Default,
    DoNothing,
    /// Stop the compilation.
    Abort,
    /// Raise a recoverable compilation error.
    Raise,
}

/// How the caller of [`Config::report_with`] wants errors handled when the
/// hook leaves the decision to the default table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorHandling {
    #[default]
    Nothing,
    Abort,
    Raise,
}

/// Renders or escalates each enabled report.
///
/// The hook may report secondary diagnostics through `conf` while handling
/// one; those go through the full reporting path, hook included. Counters
/// for the report being handled are updated after the hook returns.
pub trait ReportHook {
    fn handle(&self, conf: &mut Config, report: &Report) -> Directive;
}

impl<F> ReportHook for F
where
    F: Fn(&mut Config, &Report) -> Directive,
{
    fn handle(&self, conf: &mut Config, report: &Report) -> Directive {
        self(conf, report)
    }
}
