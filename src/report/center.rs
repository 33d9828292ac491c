use std::collections::{HashMap, HashSet};

use crate::location::SourceLocation;

use super::record::{InstantiationFrame, Report, ReportId};

/// Proof of one instantiation-context push. Must be handed back to
/// [`ReportCenter::pop_context`] in reverse push order.
#[must_use = "an instantiation context must be popped"]
#[derive(Debug)]
pub struct ContextToken {
    depth: usize,
}

/// Bookkeeping behind report delivery: id allocation, postponed reports,
/// the delivered-once set and the instantiation context stack.
#[derive(Debug, Default, Clone)]
pub struct ReportCenter {
    next_id: u32,
    postponed: HashMap<ReportId, Report>,
    written: HashSet<ReportId>,
    context: Vec<InstantiationFrame>,
}

impl ReportCenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> ReportId {
        let id = ReportId::new(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .unwrap_or_else(|| panic!("report id space exhausted"));
        id
    }

    /// Gives a fresh report its id and a snapshot of the current
    /// instantiation context. Reports that already carry an id are left
    /// alone.
    pub fn prepare(&mut self, report: &mut Report) -> ReportId {
        if let Some(id) = report.id() {
            return id;
        }
        let id = self.allocate_id();
        report.assign_id(id);
        if !self.context.is_empty() {
            report.set_trail(self.context.clone());
        }
        id
    }

    /// Stores a report for later replay and returns its id.
    pub fn add_postponed(&mut self, mut report: Report) -> ReportId {
        let id = self.prepare(&mut report);
        tracing::debug!(%id, kind = ?report.kind(), "postponed report");
        self.postponed.insert(id, report);
        id
    }

    pub fn get_postponed(&self, id: ReportId) -> Option<&Report> {
        self.postponed.get(&id)
    }

    /// False once `id` has been delivered.
    pub fn can_report(&self, id: ReportId) -> bool {
        !self.written.contains(&id)
    }

    /// Records delivery of `id`. Returns `false` if it was already recorded.
    pub fn mark_written(&mut self, id: ReportId) -> bool {
        self.written.insert(id)
    }

    pub fn push_context(&mut self, location: SourceLocation, symbol: impl Into<String>) -> ContextToken {
        self.context.push(InstantiationFrame {
            location,
            symbol: symbol.into(),
        });
        ContextToken {
            depth: self.context.len(),
        }
    }

    pub fn pop_context(&mut self, token: ContextToken) {
        if self.context.len() != token.depth {
            panic!(
                "unbalanced instantiation context: popping depth {} with {} frame(s) on the stack",
                token.depth,
                self.context.len()
            );
        }
        self.context.pop();
    }

    pub fn context(&self) -> &[InstantiationFrame] {
        &self.context
    }

    /// Top-level check that every push was popped.
    pub fn assert_balanced(&self) {
        if let Some(top) = self.context.last() {
            panic!(
                "unbalanced instantiation context: {} frame(s) left, innermost `{}`",
                self.context.len(),
                top.symbol
            );
        }
    }

    pub fn written_count(&self) -> usize {
        self.written.len()
    }

    pub fn postponed_count(&self) -> usize {
        self.postponed.len()
    }
}
