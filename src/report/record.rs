use std::fmt;

use serde::Serialize;

use crate::config::DebugFlag;
use crate::location::SourceLocation;

use super::kind::{ReportCategory, ReportKind};

/// Identifier of a report within one compilation. Ids grow monotonically and
/// are never handed out twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ReportId(u32);

impl ReportId {
    pub(crate) fn new(raw: u32) -> Self {
        ReportId(raw)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One entry of an instantiation trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstantiationFrame {
    pub location: SourceLocation,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticDetail {
    pub message: String,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InternalDetail {
    pub message: String,
    /// `file:line` of the compiler source that raised the report.
    pub origin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceDetail {
    pub flag: DebugFlag,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleDetail {
    /// Spelling the style check expects.
    pub wanted: String,
    /// Spelling found in the source.
    pub got: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NilCheckDetail {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDetail {
    pub message: String,
}

/// Category-specific data. The arm always matches the kind's category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReportPayload {
    Error(DiagnosticDetail),
    Warning(DiagnosticDetail),
    Hint(DiagnosticDetail),
    Internal(InternalDetail),
    Trace(TraceDetail),
    Linter(StyleDetail),
    NilCheck(NilCheckDetail),
    User(UserDetail),
}

/// A structured diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    id: Option<ReportId>,
    kind: ReportKind,
    location: SourceLocation,
    trail: Vec<InstantiationFrame>,
    payload: ReportPayload,
}

impl Report {
    fn build(kind: ReportKind, location: SourceLocation, payload: ReportPayload) -> Self {
        Self {
            id: None,
            kind,
            location,
            trail: Vec::new(),
            payload,
        }
    }

    fn expect_category(kind: ReportKind, allowed: &[ReportCategory]) {
        debug_assert!(
            allowed.contains(&kind.category()),
            "{:?} is a {:?} kind, expected one of {:?}",
            kind,
            kind.category(),
            allowed
        );
    }

    /// Error or fatal report.
    pub fn error(kind: ReportKind, location: SourceLocation, message: impl Into<String>) -> Self {
        Self::expect_category(kind, &[ReportCategory::Error, ReportCategory::Fatal]);
        Self::build(
            kind,
            location,
            ReportPayload::Error(DiagnosticDetail {
                message: message.into(),
                symbol: None,
            }),
        )
    }

    pub fn warning(kind: ReportKind, location: SourceLocation, message: impl Into<String>) -> Self {
        Self::expect_category(kind, &[ReportCategory::Warning]);
        Self::build(
            kind,
            location,
            ReportPayload::Warning(DiagnosticDetail {
                message: message.into(),
                symbol: None,
            }),
        )
    }

    pub fn hint(kind: ReportKind, location: SourceLocation, message: impl Into<String>) -> Self {
        Self::expect_category(kind, &[ReportCategory::Hint]);
        Self::build(
            kind,
            location,
            ReportPayload::Hint(DiagnosticDetail {
                message: message.into(),
                symbol: None,
            }),
        )
    }

    /// Macro or ARC expansion hint for `symbol`.
    pub fn expansion(
        kind: ReportKind,
        location: SourceLocation,
        symbol: impl Into<String>,
        expanded: impl Into<String>,
    ) -> Self {
        debug_assert!(kind.is_expansion(), "{:?} is not an expansion kind", kind);
        Self::hint(kind, location, expanded).with_symbol(symbol)
    }

    pub fn internal(kind: ReportKind, location: SourceLocation, message: impl Into<String>) -> Self {
        Self::expect_category(kind, &[ReportCategory::Internal]);
        Self::build(
            kind,
            location,
            ReportPayload::Internal(InternalDetail {
                message: message.into(),
                origin: None,
            }),
        )
    }

    pub fn trace(kind: ReportKind, location: SourceLocation, message: impl Into<String>) -> Self {
        Self::expect_category(kind, &[ReportCategory::Debug]);
        let flag = kind.debug_flag().unwrap_or(DebugFlag::SemTrace);
        Self::build(
            kind,
            location,
            ReportPayload::Trace(TraceDetail {
                flag,
                message: message.into(),
            }),
        )
    }

    pub fn linter(
        kind: ReportKind,
        location: SourceLocation,
        wanted: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        Self::expect_category(kind, &[ReportCategory::Linter]);
        Self::build(
            kind,
            location,
            ReportPayload::Linter(StyleDetail {
                wanted: wanted.into(),
                got: got.into(),
            }),
        )
    }

    pub fn nil_check(kind: ReportKind, location: SourceLocation, expression: impl Into<String>) -> Self {
        Self::expect_category(kind, &[ReportCategory::NilCheck]);
        Self::build(
            kind,
            location,
            ReportPayload::NilCheck(NilCheckDetail {
                expression: expression.into(),
            }),
        )
    }

    pub fn user(kind: ReportKind, location: SourceLocation, message: impl Into<String>) -> Self {
        Self::expect_category(kind, &[ReportCategory::User]);
        Self::build(
            kind,
            location,
            ReportPayload::User(UserDetail {
                message: message.into(),
            }),
        )
    }

    /// Attaches the symbol a diagnostic is about. No effect on payloads that
    /// carry no symbol.
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        if let ReportPayload::Error(detail)
        | ReportPayload::Warning(detail)
        | ReportPayload::Hint(detail) = &mut self.payload
        {
            detail.symbol = Some(symbol.into());
        }
        self
    }

    /// Records where in the compiler an internal report was raised.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        if let ReportPayload::Internal(detail) = &mut self.payload {
            detail.origin = Some(origin.into());
        }
        self
    }

    pub fn id(&self) -> Option<ReportId> {
        self.id
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn category(&self) -> ReportCategory {
        self.kind.category()
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn trail(&self) -> &[InstantiationFrame] {
        &self.trail
    }

    pub fn payload(&self) -> &ReportPayload {
        &self.payload
    }

    pub fn symbol(&self) -> Option<&str> {
        match &self.payload {
            ReportPayload::Error(detail)
            | ReportPayload::Warning(detail)
            | ReportPayload::Hint(detail) => detail.symbol.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn assign_id(&mut self, id: ReportId) {
        self.id = Some(id);
    }

    pub(crate) fn set_trail(&mut self, trail: Vec<InstantiationFrame>) {
        self.trail = trail;
    }
}

// Internal compiler report tagged with the Rust source location it came from.
#[macro_export]
macro_rules! internal_report {
    ($kind:expr, $location:expr, $msg:expr) => {{
        $crate::report::Report::internal($kind, $location, $msg).with_origin(format!(
            "{}:{} ({})",
            file!(),
            line!(),
            module_path!()
        ))
    }};
}
