//! Enablement and severity rules.
//!
//! `is_kind_enabled` walks a fixed priority list; the first rule that claims
//! a kind decides it:
//!
//! 1. feature-gated kinds follow their experimental feature
//! 2. trace kinds follow their debug flag
//! 3. style-check kinds follow the style-check mode
//! 4. hints go through [`Config::has_hint`]
//! 5. warnings go through [`Config::has_warn`]
//! 6. error, fatal and trace severities are always on
//! 7. everything else needs the active note set, and is muted while serving
//!    an editor unless IDE debugging is on
//!
//! Expansion reports whose symbol sits on a worklist bypass all of the above.

use crate::config::{Config, GlobalOption};

use super::{
    kind::{ReportKind, ReportSeverity},
    record::Report,
};

impl Config {
    pub fn is_enabled(&self, report: &Report) -> bool {
        self.is_expansion_requested(report) || self.is_kind_enabled(report.kind())
    }

    fn is_expansion_requested(&self, report: &Report) -> bool {
        let Some(symbol) = report.symbol() else {
            return false;
        };
        match report.kind() {
            ReportKind::ExpandMacro => self.macros_to_expand.contains(symbol),
            ReportKind::ExpandArc => self.arc_to_expand.contains(symbol),
            _ => false,
        }
    }

    pub fn is_kind_enabled(&self, kind: ReportKind) -> bool {
        if let Some(feature) = kind.required_feature() {
            return self.options.has_feature(feature);
        }
        if let Some(flag) = kind.debug_flag() {
            return self.options.has_debug(flag);
        }
        if kind.is_linter() {
            let style = self.options.style_check_active();
            return match kind {
                ReportKind::LinterReportUse => style,
                _ => style && !self.options.global.contains(GlobalOption::StyleUsages),
            };
        }
        if kind.is_hint() {
            return self.has_hint(kind);
        }
        if kind.is_warning() {
            return self.has_warn(kind);
        }
        match kind.default_severity() {
            ReportSeverity::Error | ReportSeverity::Fatal | ReportSeverity::Trace => true,
            _ => {
                let muted_for_ide = self.options.is_ide_tooling()
                    && !self.options.global.contains(GlobalOption::IdeDebug);
                self.notes.active().contains(kind) && !muted_for_ide
            }
        }
    }

    pub fn has_hint(&self, kind: ReportKind) -> bool {
        if !self.options.hints_enabled() {
            return false;
        }
        if kind.is_global_scope_hint() {
            self.notes.main_package().contains(kind)
        } else {
            self.notes.active().contains(kind)
        }
    }

    pub fn has_warn(&self, kind: ReportKind) -> bool {
        self.options.warnings_enabled() && self.notes.active().contains(kind)
    }

    pub fn severity(&self, report: &Report) -> ReportSeverity {
        self.kind_severity(report.kind())
    }

    pub fn kind_severity(&self, kind: ReportKind) -> ReportSeverity {
        if kind.is_linter() && self.options.style_as_error() {
            return ReportSeverity::Error;
        }
        match kind.default_severity() {
            ReportSeverity::Warning if self.notes.warnings_as_errors().contains(kind) => {
                ReportSeverity::Error
            }
            ReportSeverity::Hint if self.notes.hints_as_errors().contains(kind) => {
                ReportSeverity::Error
            }
            severity => severity,
        }
    }

    pub fn is_code_error(&self, report: &Report) -> bool {
        self.severity(report) == ReportSeverity::Error
    }
}
