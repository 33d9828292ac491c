use std::{cell::RefCell, path::Path, rc::Rc, sync::Arc};

use crate::config::{Command, Config, Constants};
use crate::location::SourceLocation;

use super::{
    Directive, ErrorHandling, RecoverableCompilationError, Report, ReportError, ReportKind,
    ReportPayload,
};

type Log = Rc<RefCell<Vec<ReportKind>>>;

fn recording(directive: Directive) -> (Log, impl Fn(&mut Config, &Report) -> Directive) {
    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    let hook = move |_: &mut Config, report: &Report| {
        sink.borrow_mut().push(report.kind());
        directive
    };
    (log, hook)
}

fn conf_with(directive: Directive) -> (Log, Config) {
    let (log, hook) = recording(directive);
    (log, Config::new(Arc::new(Constants::new()), hook))
}

fn at() -> SourceLocation {
    SourceLocation::unknown()
}

#[test]
fn enabled_warning_is_delivered_and_counted() {
    let (log, mut conf) = conf_with(Directive::Default);
    let result = conf.report(Report::warning(ReportKind::Deprecated, at(), "old"));

    assert_eq!(result, Ok(Directive::Default));
    assert_eq!(*log.borrow(), vec![ReportKind::Deprecated]);
    assert_eq!(conf.warning_counter(), 1);
    assert_eq!(conf.exit_code(), 0);
}

#[test]
fn suppressed_report_skips_the_hook() {
    let (log, mut conf) = conf_with(Directive::Default);
    let result = conf.report(Report::hint(ReportKind::GcStats, at(), "stats"));

    assert_eq!(result, Ok(Directive::DoNothing));
    assert!(log.borrow().is_empty());
    assert_eq!(conf.hint_counter(), 0);
    assert_eq!(conf.reports().written_count(), 1);
}

#[test]
fn first_error_reaches_the_default_threshold() {
    let (_, mut conf) = conf_with(Directive::Default);
    let result = conf.report(Report::error(ReportKind::UndeclaredIdentifier, at(), "x"));

    assert_eq!(
        result,
        Err(ReportError::Recoverable(RecoverableCompilationError { errors: 1 }))
    );
    assert_eq!(conf.error_counter(), 1);
    assert_eq!(conf.exit_code(), 1);
}

#[test]
fn caller_error_handling_applies_below_the_threshold() {
    let (_, mut conf) = conf_with(Directive::Default);
    conf.set_error_max(10);

    let quiet = conf.report(Report::error(ReportKind::TypeMismatch, at(), "a"));
    assert_eq!(quiet, Ok(Directive::Default));

    let aborted = conf.report_with(
        Report::error(ReportKind::TypeMismatch, at(), "b"),
        ErrorHandling::Abort,
    );
    assert_eq!(aborted, Err(ReportError::Aborted { exit_code: 1 }));

    let raised = conf.report_with(
        Report::error(ReportKind::TypeMismatch, at(), "c"),
        ErrorHandling::Raise,
    );
    assert!(raised.unwrap_err().is_recoverable());
    assert_eq!(conf.error_counter(), 3);
}

#[test]
fn abort_request_is_ignored_while_serving_an_editor() {
    let (_, mut conf) = conf_with(Directive::Default);
    conf.set_error_max(0);
    conf.options.command = Command::IdeTools;

    let result = conf.report_with(
        Report::error(ReportKind::SyntaxError, at(), "unexpected token"),
        ErrorHandling::Abort,
    );
    assert_eq!(result, Ok(Directive::Default));
}

#[test]
fn fatal_reports_abort() {
    let (_, mut conf) = conf_with(Directive::Default);
    let result = conf.report(Report::error(ReportKind::FatalError, at(), "cannot continue"));
    assert_eq!(result, Err(ReportError::Aborted { exit_code: 1 }));
}

#[test]
fn hook_directive_wins_over_the_table() {
    let (_, mut conf) = conf_with(Directive::DoNothing);
    let result = conf.report(Report::error(ReportKind::UndeclaredIdentifier, at(), "x"));
    assert_eq!(result, Ok(Directive::DoNothing));
    assert_eq!(conf.error_counter(), 1);

    let (_, mut conf) = conf_with(Directive::Abort);
    let result = conf.report(Report::warning(ReportKind::Deprecated, at(), "old"));
    assert_eq!(result, Err(ReportError::Aborted { exit_code: 1 }));
}

#[test]
fn postponed_reports_replay_at_most_once() {
    let (log, mut conf) = conf_with(Directive::Default);
    let id = conf.postpone(Report::warning(ReportKind::UnreachableCode, at(), "dead"));

    assert!(conf.reports().can_report(id));
    assert_eq!(conf.report_id(id, ErrorHandling::Nothing), Ok(Directive::Default));
    assert!(!conf.reports().can_report(id));
    assert_eq!(conf.report_id(id, ErrorHandling::Nothing), Ok(Directive::DoNothing));
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn trail_is_rendered_through_the_registry() {
    let (log, mut conf) = conf_with(Directive::DoNothing);
    conf.resolver_mut().set_project_path("/proj");
    let file = conf.register_file(Path::new("/proj/src/m.nim"));

    let captured = conf.with_instantiation(SourceLocation::new(file, 4, 2), "mkPair", |conf| {
        let mut report = Report::error(ReportKind::TypeMismatch, SourceLocation::new(file, 9, 0), "bad");
        conf.reports_mut().prepare(&mut report);
        report
    });
    conf.assert_context_balanced();

    assert_eq!(conf.render_trail(&captured), vec!["src/m.nim(4, 2) mkPair".to_string()]);
    assert!(log.borrow().is_empty());
}

#[test]
fn replacing_the_hook_reroutes_delivery() {
    let (first, mut conf) = conf_with(Directive::Default);
    let (second, hook) = recording(Directive::Default);
    assert!(conf.replace_hook(hook).is_some());

    conf.report(Report::warning(ReportKind::Deprecated, at(), "old"))
        .unwrap();
    assert!(first.borrow().is_empty());
    assert_eq!(second.borrow().len(), 1);
}

#[test]
fn internal_reports_record_their_origin() {
    let report = crate::internal_report!(ReportKind::UnreachableState, at(), "bad state");
    match report.payload() {
        ReportPayload::Internal(detail) => {
            let origin = detail.origin.as_deref().unwrap_or_default();
            assert!(origin.contains("deliver_test.rs"), "origin was {origin}");
        }
        other => panic!("unexpected payload {:?}", other),
    }
}

#[test]
#[should_panic(expected = "no report hook installed")]
fn delivering_without_a_hook_panics() {
    let mut conf = Config::detached(Arc::new(Constants::new()));
    conf.deliver(&Report::warning(ReportKind::Deprecated, at(), "old"));
}

#[test]
#[should_panic(expected = "without a kind")]
fn delivering_an_unset_kind_panics() {
    let (_, mut conf) = conf_with(Directive::Default);
    conf.deliver(&Report::internal(ReportKind::Unset, at(), ""));
}

#[test]
#[should_panic(expected = "without a kind")]
fn reporting_an_unset_kind_panics_before_classification() {
    let (_, mut conf) = conf_with(Directive::Default);
    let _ = conf.report(Report::internal(ReportKind::Unset, at(), ""));
}

#[test]
#[should_panic(expected = "without a kind")]
fn replaying_an_unset_kind_panics() {
    let (_, mut conf) = conf_with(Directive::Default);
    let id = conf.postpone(Report::internal(ReportKind::Unset, at(), ""));
    let _ = conf.report_id(id, ErrorHandling::Nothing);
}

#[test]
fn a_report_with_an_id_reaches_the_hook_once() {
    let (log, mut conf) = conf_with(Directive::Default);
    let id = conf.postpone(Report::warning(ReportKind::UnreachableCode, at(), "dead"));
    let copy = conf.reports().get_postponed(id).cloned().unwrap();
    assert_eq!(copy.id(), Some(id));

    assert_eq!(conf.report(copy.clone()), Ok(Directive::Default));
    assert_eq!(conf.report(copy), Ok(Directive::DoNothing));
    assert_eq!(conf.report_id(id, ErrorHandling::Nothing), Ok(Directive::DoNothing));
    assert_eq!(*log.borrow(), vec![ReportKind::UnreachableCode]);
    assert_eq!(conf.warning_counter(), 1);
}

#[test]
fn hook_can_report_while_delivering() {
    let log: Rc<RefCell<Vec<(ReportKind, Vec<String>)>>> = Rc::default();
    let sink = Rc::clone(&log);
    let hook = move |conf: &mut Config, report: &Report| {
        sink.borrow_mut().push((report.kind(), conf.render_trail(report)));
        if report.kind() == ReportKind::TypeMismatch {
            let note = SourceLocation::new(report.location().file, 1, 0);
            let nested = conf.with_instantiation(note, "candidate", |conf| {
                conf.report(Report::warning(ReportKind::Deprecated, note, "see candidate"))
            });
            assert_eq!(nested, Ok(Directive::Default));
        }
        Directive::Default
    };
    let mut conf = Config::new(Arc::new(Constants::new()), hook);
    conf.set_error_max(0);
    conf.resolver_mut().set_project_path("/proj");
    let file = conf.register_file(Path::new("/proj/m.nim"));

    let outer = conf.with_instantiation(SourceLocation::new(file, 3, 4), "mkPair", |conf| {
        conf.report(Report::error(ReportKind::TypeMismatch, SourceLocation::new(file, 9, 0), "bad"))
    });
    assert_eq!(outer, Ok(Directive::Default));
    conf.assert_context_balanced();

    assert_eq!(
        *log.borrow(),
        vec![
            (ReportKind::TypeMismatch, vec!["m.nim(3, 4) mkPair".to_string()]),
            (
                ReportKind::Deprecated,
                vec!["m.nim(3, 4) mkPair".to_string(), "m.nim(1, 0) candidate".to_string()]
            ),
        ]
    );
    assert_eq!((conf.error_counter(), conf.warning_counter()), (1, 1));
    assert_eq!(conf.reports().written_count(), 2);
}
