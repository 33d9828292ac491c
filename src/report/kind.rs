//! The closed set of report kinds and their intrinsic classification.

use serde::Serialize;

use crate::config::{DebugFlag, Feature};
use crate::enum_set::set_element_enum;

/// Category a kind belongs to. Decides which enablement rule applies and
/// which payload arm a report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReportCategory {
    Error,
    Fatal,
    Warning,
    Hint,
    Internal,
    Debug,
    Linter,
    NilCheck,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ReportSeverity {
    Debug,
    Trace,
    Hint,
    Warning,
    Error,
    Fatal,
}

set_element_enum! {
    /// Every diagnostic the front end can emit.
    pub enum ReportKind {
        /// Placeholder; delivering it is a programming error.
        Unset,

        // Errors
        LexerError,
        SyntaxError,
        UndeclaredIdentifier,
        TypeMismatch,
        CannotOpenFile,
        IllFormedAst,

        // Fatal
        FatalError,

        // Warnings
        Deprecated,
        UnreachableCode,
        ProveField,
        GcUnsafe,
        Uninit,
        CaseTransition,
        ConfigDeprecated,

        // Hints
        Success,
        SuccessX,
        Conf,
        Processing,
        ProcessingStmt,
        Pattern,
        Executing,
        Linking,
        CompilingExtraFile,
        Path,
        Dependency,
        GlobalVar,
        GcStats,
        VmStackTrace,
        ExtendedContext,
        DeclaredLoc,
        XDeclaredButNotUsed,
        ConvToBaseNotNeeded,
        ExprAlwaysX,
        ExpandMacro,
        ExpandArc,

        // Internal
        InternalError,
        UnreachableState,
        InternalStackTrace,
        EchoMessage,
        VersionInfo,
        HelpText,

        // Debug traces
        VmTrace,
        SemTrace,
        ParserTrace,
        CodegenTrace,

        // Style checks
        LinterReport,
        LinterReportUse,

        // Nil checks
        NilDereference,
        NilPossible,

        // User-issued
        UserHint,
        UserWarning,
        UserError,
        QuitCalled,
    }
}

impl ReportKind {
    pub fn category(self) -> ReportCategory {
        use ReportKind::*;
        match self {
            LexerError | SyntaxError | UndeclaredIdentifier | TypeMismatch | CannotOpenFile
            | IllFormedAst => ReportCategory::Error,
            FatalError => ReportCategory::Fatal,
            Deprecated | UnreachableCode | ProveField | GcUnsafe | Uninit | CaseTransition
            | ConfigDeprecated => ReportCategory::Warning,
            Success | SuccessX | Conf | Processing | ProcessingStmt | Pattern | Executing
            | Linking | CompilingExtraFile | Path | Dependency | GlobalVar | GcStats
            | VmStackTrace | ExtendedContext | DeclaredLoc | XDeclaredButNotUsed
            | ConvToBaseNotNeeded | ExprAlwaysX | ExpandMacro | ExpandArc => ReportCategory::Hint,
            Unset | InternalError | UnreachableState | InternalStackTrace | EchoMessage
            | VersionInfo | HelpText => ReportCategory::Internal,
            VmTrace | SemTrace | ParserTrace | CodegenTrace => ReportCategory::Debug,
            LinterReport | LinterReportUse => ReportCategory::Linter,
            NilDereference | NilPossible => ReportCategory::NilCheck,
            UserHint | UserWarning | UserError | QuitCalled => ReportCategory::User,
        }
    }

    /// Severity before any as-error escalation.
    pub fn default_severity(self) -> ReportSeverity {
        use ReportKind::*;
        match self {
            Unset => ReportSeverity::Debug,
            InternalError | UnreachableState => ReportSeverity::Fatal,
            InternalStackTrace => ReportSeverity::Trace,
            EchoMessage | VersionInfo | HelpText => ReportSeverity::Hint,
            UserHint | QuitCalled => ReportSeverity::Hint,
            UserWarning => ReportSeverity::Warning,
            UserError => ReportSeverity::Error,
            _ => match self.category() {
                ReportCategory::Error => ReportSeverity::Error,
                ReportCategory::Fatal => ReportSeverity::Fatal,
                ReportCategory::Warning | ReportCategory::NilCheck => ReportSeverity::Warning,
                ReportCategory::Hint | ReportCategory::Linter => ReportSeverity::Hint,
                ReportCategory::Debug => ReportSeverity::Debug,
                ReportCategory::Internal | ReportCategory::User => ReportSeverity::Hint,
            },
        }
    }

    /// Experimental feature gating this kind, if any.
    pub fn required_feature(self) -> Option<Feature> {
        match self.category() {
            ReportCategory::NilCheck => Some(Feature::StrictNotNil),
            _ => None,
        }
    }

    /// Debug flag gating this kind, if any.
    pub fn debug_flag(self) -> Option<DebugFlag> {
        match self {
            ReportKind::VmTrace => Some(DebugFlag::VmTrace),
            ReportKind::SemTrace => Some(DebugFlag::SemTrace),
            ReportKind::ParserTrace => Some(DebugFlag::ParserTrace),
            ReportKind::CodegenTrace => Some(DebugFlag::CodegenTrace),
            _ => None,
        }
    }

    /// Kinds governed by the hint switches and note sets.
    pub fn is_hint(self) -> bool {
        self.category() == ReportCategory::Hint
            || matches!(self, ReportKind::UserHint | ReportKind::QuitCalled)
    }

    /// Kinds governed by the warning switches and note sets.
    pub fn is_warning(self) -> bool {
        self.category() == ReportCategory::Warning || self == ReportKind::UserWarning
    }

    pub fn is_linter(self) -> bool {
        self.category() == ReportCategory::Linter
    }

    /// Hints that describe the whole compilation rather than a module, and so
    /// are checked against the main-package notes.
    pub fn is_global_scope_hint(self) -> bool {
        matches!(self, ReportKind::Conf | ReportKind::Processing)
    }

    /// Kinds carrying a symbol that can force enablement through an
    /// expansion worklist.
    pub fn is_expansion(self) -> bool {
        matches!(self, ReportKind::ExpandMacro | ReportKind::ExpandArc)
    }
}

impl Default for ReportKind {
    fn default() -> Self {
        ReportKind::Unset
    }
}

/// Kinds of every hint-governed category.
pub fn hint_kinds() -> impl Iterator<Item = ReportKind> {
    ReportKind::ALL.iter().copied().filter(|kind| kind.is_hint())
}

/// Kinds of every warning-governed category.
pub fn warning_kinds() -> impl Iterator<Item = ReportKind> {
    ReportKind::ALL.iter().copied().filter(|kind| kind.is_warning())
}
