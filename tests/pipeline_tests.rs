use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use frontend_config::{
    Config, Constants, Directive, Report, ReportKind, SourceLocation,
    config::{GlobalOption, LocalOption},
    report::{ErrorHandling, NoteAxis, ReportError, ReportSeverity},
};

fn temp_root(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut root = std::env::temp_dir();
    root.push(format!(
        "frontend_config_pipeline_{}_{}_{}",
        label,
        std::process::id(),
        nanos
    ));
    fs::create_dir_all(&root).expect("create temp root");
    fs::canonicalize(&root).expect("canonical temp root")
}

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, contents).expect("write file");
}

/// Hook that renders every delivered report as one line.
fn rendering_conf(root: &Path) -> (Rc<RefCell<Vec<String>>>, Config) {
    let lines: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&lines);
    let hook = move |conf: &mut Config, report: &Report| {
        let severity = conf.severity(report);
        let mut line = format!("{:?} {:?} at {}", severity, report.kind(), conf.format_location(report.location()));
        for frame in conf.render_trail(report) {
            line.push_str(" <- ");
            line.push_str(&frame);
        }
        sink.borrow_mut().push(line);
        Directive::Default
    };
    let mut conf = Config::new(Arc::new(Constants::new()), hook);
    conf.resolver_mut().set_lib_path(root.join("lib"));
    conf.resolver_mut().set_project_path(root.join("proj"));
    conf.resolver_mut().add_search_path(root.join("proj/src"));
    (lines, conf)
}

#[test]
fn resolve_register_report_round() {
    let root = temp_root("round");
    write_file(&root.join("lib/pure/os.nim"), "proc getEnv*() = discard\n");
    write_file(&root.join("proj/src/main.nim"), "import std/os\nimport helpers\n");
    write_file(&root.join("proj/src/helpers.nim"), "proc help*() = discard\nproc unused() = discard\n");
    let (lines, mut conf) = rendering_conf(&root);
    conf.set_error_max(5);

    let (main_path, main) = conf
        .import_module("main", &root.join("proj/src"))
        .expect("main resolves");
    let (_, os) = conf.import_module("std/os", &root.join("proj/src")).expect("std/os resolves");
    let (_, helpers) = conf.import_module("helpers", &root.join("proj/src")).expect("helpers resolves");
    assert_eq!(main_path, root.join("proj/src/main.nim"));
    assert_eq!((main.as_i32(), os.as_i32(), helpers.as_i32()), (0, 1, 2));

    // Importing again hands back the same index.
    let (_, again) = conf.import_module("helpers", &root.join("proj/src")).unwrap();
    assert_eq!(again, helpers);

    let unused = Report::hint(ReportKind::XDeclaredButNotUsed, SourceLocation::new(helpers, 2, 5), "unused")
        .with_symbol("unused");
    assert_eq!(conf.report(unused), Ok(Directive::Default));

    let mismatch = conf.with_instantiation(SourceLocation::new(main, 2, 0), "help", |conf| {
        conf.report(Report::error(ReportKind::TypeMismatch, SourceLocation::new(helpers, 1, 15), "got int"))
    });
    assert_eq!(mismatch, Ok(Directive::Default));
    conf.assert_context_balanced();

    assert_eq!(
        *lines.borrow(),
        vec![
            "Hint XDeclaredButNotUsed at src/helpers.nim(2, 5)".to_string(),
            "Error TypeMismatch at src/helpers.nim(1, 15) <- src/main.nim(2, 0) help".to_string(),
        ]
    );
    assert_eq!(conf.files().source_line(SourceLocation::new(helpers, 1, 0)), Some("proc help*() = discard"));
    assert_eq!((conf.error_counter(), conf.hint_counter()), (1, 1));

    fs::remove_dir_all(root).ok();
}

#[test]
fn strict_project_settings_escalate_and_stop() {
    let root = temp_root("strict");
    let (lines, mut conf) = rendering_conf(&root);
    conf.options.global.insert(GlobalOption::StyleError);
    conf.notes_mut()
        .set_from_cmdline(NoteAxis::WarningsAsErrors, ReportKind::Deprecated, true);
    conf.set_error_max(2);

    let style = Report::linter(ReportKind::LinterReport, SourceLocation::command_line(), "fooBar", "foo_bar");
    assert_eq!(conf.severity(&style), ReportSeverity::Error);
    assert_eq!(conf.report(style), Ok(Directive::Default));

    let deprecated = Report::warning(ReportKind::Deprecated, SourceLocation::command_line(), "old");
    let err = conf.report(deprecated).unwrap_err();
    assert!(err.is_recoverable());
    assert_eq!(err.to_string(), "compilation stopped after 2 error(s)");
    assert_eq!(conf.exit_code(), 1);
    assert_eq!(lines.borrow().len(), 2);
    assert!(lines.borrow()[1].starts_with("Error Deprecated at command line(1, 1)"));

    fs::remove_dir_all(root).ok();
}

#[test]
fn silenced_compilation_keeps_errors() {
    let root = temp_root("silenced");
    let (lines, mut conf) = rendering_conf(&root);
    conf.options.local.remove(LocalOption::Hints);
    conf.options.local.remove(LocalOption::Warnings);

    let location = SourceLocation::unknown();
    conf.report(Report::hint(ReportKind::XDeclaredButNotUsed, location, "x")).unwrap();
    conf.report(Report::warning(ReportKind::Deprecated, location, "y")).unwrap();
    let result = conf.report_with(
        Report::error(ReportKind::SyntaxError, location, "z"),
        ErrorHandling::Nothing,
    );

    assert!(matches!(result, Err(ReportError::Recoverable(_))));
    assert_eq!(*lines.borrow(), vec!["Error SyntaxError at ???(0)".to_string()]);

    fs::remove_dir_all(root).ok();
}
