use std::sync::Arc;

use crate::config::{Command, Config, Constants, DebugFlag, Feature, GlobalOption, LocalOption};
use crate::location::SourceLocation;

use super::{NoteAxis, Report, ReportKind, ReportSeverity};

fn conf() -> Config {
    Config::detached(Arc::new(Constants::new()))
}

fn at() -> SourceLocation {
    SourceLocation::unknown()
}

#[test]
fn warnings_as_errors_escalates_and_reverts() {
    let mut conf = conf();
    let report = Report::warning(ReportKind::Deprecated, at(), "old api");
    assert_eq!(conf.severity(&report), ReportSeverity::Warning);

    conf.notes_mut()
        .set(NoteAxis::WarningsAsErrors, ReportKind::Deprecated, true);
    assert_eq!(conf.severity(&report), ReportSeverity::Error);
    assert!(conf.is_code_error(&report));

    conf.notes_mut()
        .set(NoteAxis::WarningsAsErrors, ReportKind::Deprecated, false);
    assert_eq!(conf.severity(&report), ReportSeverity::Warning);
    assert!(!conf.is_code_error(&report));
}

#[test]
fn hints_as_errors_escalates_hints_only() {
    let mut conf = conf();
    conf.notes_mut()
        .set(NoteAxis::HintsAsErrors, ReportKind::XDeclaredButNotUsed, true);
    conf.notes_mut()
        .set(NoteAxis::HintsAsErrors, ReportKind::Deprecated, true);

    let hint = Report::hint(ReportKind::XDeclaredButNotUsed, at(), "unused");
    let warning = Report::warning(ReportKind::Deprecated, at(), "old api");
    assert_eq!(conf.severity(&hint), ReportSeverity::Error);
    assert_eq!(conf.severity(&warning), ReportSeverity::Warning);
}

#[test]
fn style_error_mode_makes_linter_reports_errors() {
    let mut conf = conf();
    let report = Report::linter(ReportKind::LinterReport, at(), "fooBar", "foo_bar");
    assert_eq!(conf.severity(&report), ReportSeverity::Hint);

    conf.options.global.insert(GlobalOption::StyleError);
    assert_eq!(conf.severity(&report), ReportSeverity::Error);

    conf.notes_mut()
        .set(NoteAxis::HintsAsErrors, ReportKind::LinterReport, false);
    conf.notes_mut()
        .set(NoteAxis::WarningsAsErrors, ReportKind::LinterReport, false);
    assert_eq!(conf.severity(&report), ReportSeverity::Error);
}

#[test]
fn linter_kinds_follow_style_mode() {
    let mut conf = conf();
    assert!(!conf.is_kind_enabled(ReportKind::LinterReport));
    assert!(!conf.is_kind_enabled(ReportKind::LinterReportUse));

    conf.options.global.insert(GlobalOption::StyleHint);
    assert!(conf.is_kind_enabled(ReportKind::LinterReport));
    assert!(conf.is_kind_enabled(ReportKind::LinterReportUse));

    conf.options.global.insert(GlobalOption::StyleUsages);
    assert!(!conf.is_kind_enabled(ReportKind::LinterReport));
    assert!(conf.is_kind_enabled(ReportKind::LinterReportUse));
}

#[test]
fn feature_and_debug_gates_come_first() {
    let mut conf = conf();
    conf.notes_mut().set(NoteAxis::Active, ReportKind::NilPossible, true);
    assert!(!conf.is_kind_enabled(ReportKind::NilPossible));
    conf.options.features.insert(Feature::StrictNotNil);
    assert!(conf.is_kind_enabled(ReportKind::NilPossible));

    assert!(!conf.is_kind_enabled(ReportKind::SemTrace));
    conf.options.debug.insert(DebugFlag::SemTrace);
    assert!(conf.is_kind_enabled(ReportKind::SemTrace));
    assert!(!conf.is_kind_enabled(ReportKind::VmTrace));
}

#[test]
fn hint_switch_and_global_scope_hints() {
    let mut conf = conf();
    assert!(!conf.has_hint(ReportKind::Conf));

    // Only the main-package set decides for global-scope hints.
    conf.notes_mut().set(NoteAxis::MainPackage, ReportKind::Conf, true);
    assert!(!conf.notes().active().contains(ReportKind::Conf));
    assert!(conf.has_hint(ReportKind::Conf));

    assert!(conf.has_hint(ReportKind::XDeclaredButNotUsed));
    conf.options.local.remove(LocalOption::Hints);
    assert!(!conf.has_hint(ReportKind::XDeclaredButNotUsed));
    assert!(!conf.has_hint(ReportKind::Conf));
}

#[test]
fn warnings_need_switch_and_active_membership() {
    let mut conf = conf();
    assert!(conf.has_warn(ReportKind::Deprecated));
    assert!(!conf.has_warn(ReportKind::Uninit));

    conf.options.local.remove(LocalOption::Warnings);
    assert!(!conf.has_warn(ReportKind::Deprecated));
    assert!(!conf.is_kind_enabled(ReportKind::UserWarning));
}

#[test]
fn foreign_modules_use_the_foreign_notes() {
    let mut conf = conf();
    conf.enter_module(false);
    assert!(!conf.is_kind_enabled(ReportKind::XDeclaredButNotUsed));
    assert!(conf.is_kind_enabled(ReportKind::UserHint));
    conf.enter_module(true);
    assert!(conf.is_kind_enabled(ReportKind::XDeclaredButNotUsed));
}

#[test]
fn errors_are_always_enabled() {
    let mut conf = conf();
    for kind in [ReportKind::UndeclaredIdentifier, ReportKind::FatalError, ReportKind::InternalError] {
        conf.notes_mut().set(NoteAxis::Active, kind, false);
        assert!(conf.is_kind_enabled(kind), "{:?} suppressed", kind);
    }
    assert!(conf.is_kind_enabled(ReportKind::InternalStackTrace));
    assert!(conf.is_kind_enabled(ReportKind::UserError));
}

#[test]
fn ide_tooling_mutes_plain_notices() {
    let mut conf = conf();
    assert!(conf.is_kind_enabled(ReportKind::EchoMessage));

    conf.options.command = Command::IdeTools;
    assert!(!conf.is_kind_enabled(ReportKind::EchoMessage));
    assert!(conf.is_kind_enabled(ReportKind::TypeMismatch));

    conf.options.global.insert(GlobalOption::IdeDebug);
    assert!(conf.is_kind_enabled(ReportKind::EchoMessage));
}

#[test]
fn expansion_worklist_overrides_suppression() {
    let mut conf = conf();
    conf.options.local.remove(LocalOption::Hints);
    let wanted = Report::expansion(ReportKind::ExpandMacro, at(), "myMacro", "echo 1");
    let other = Report::expansion(ReportKind::ExpandMacro, at(), "other", "echo 2");
    let arc = Report::expansion(ReportKind::ExpandArc, at(), "myMacro", "=destroy(x)");
    assert!(!conf.is_enabled(&wanted));

    conf.expand_macro("myMacro");
    assert!(conf.is_enabled(&wanted));
    assert!(!conf.is_enabled(&other));
    assert!(!conf.is_enabled(&arc));

    conf.expand_arc("myMacro");
    assert!(conf.is_enabled(&arc));
}
