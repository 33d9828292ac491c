use serde::Serialize;

use crate::enum_set::{EnumSet, set_element_enum};

use super::kind::ReportKind;

pub type NoteSet = EnumSet<ReportKind>;

set_element_enum! {
    /// The independent policy axes a report kind can be a member of.
    pub enum NoteAxis {
        /// Kinds reported for the module being processed.
        Active,
        /// Kinds reported for modules of the package being compiled.
        MainPackage,
        /// Kinds reported for modules of every other package.
        ForeignPackage,
        WarningsAsErrors,
        HintsAsErrors,
        /// Kinds whose state was set on the command line. Sticky: later
        /// default or config-file assignments leave them alone.
        CmdlineModified,
    }
}

/// The six note sets of a compilation.
///
/// `Active` and `MainPackage` writes go through the sticky check: a kind that
/// is in `CmdlineModified` only changes state through
/// [`NoteSets::set_from_cmdline`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteSets {
    active: NoteSet,
    main_package: NoteSet,
    foreign_package: NoteSet,
    warnings_as_errors: NoteSet,
    hints_as_errors: NoteSet,
    cmdline_modified: NoteSet,
    /// Kinds set explicitly from a config file or programmatically.
    explicit: NoteSet,
    /// Which package's notes `active` currently mirrors.
    #[serde(skip)]
    in_main_package: bool,
}

impl NoteSets {
    pub fn new(initial: NoteSet, foreign_package: NoteSet) -> Self {
        Self {
            active: initial,
            main_package: initial,
            foreign_package,
            warnings_as_errors: NoteSet::empty(),
            hints_as_errors: NoteSet::empty(),
            cmdline_modified: NoteSet::empty(),
            explicit: NoteSet::empty(),
            in_main_package: true,
        }
    }

    pub fn get(&self, axis: NoteAxis) -> &NoteSet {
        match axis {
            NoteAxis::Active => &self.active,
            NoteAxis::MainPackage => &self.main_package,
            NoteAxis::ForeignPackage => &self.foreign_package,
            NoteAxis::WarningsAsErrors => &self.warnings_as_errors,
            NoteAxis::HintsAsErrors => &self.hints_as_errors,
            NoteAxis::CmdlineModified => &self.cmdline_modified,
        }
    }

    fn get_mut(&mut self, axis: NoteAxis) -> &mut NoteSet {
        match axis {
            NoteAxis::Active => &mut self.active,
            NoteAxis::MainPackage => &mut self.main_package,
            NoteAxis::ForeignPackage => &mut self.foreign_package,
            NoteAxis::WarningsAsErrors => &mut self.warnings_as_errors,
            NoteAxis::HintsAsErrors => &mut self.hints_as_errors,
            NoteAxis::CmdlineModified => &mut self.cmdline_modified,
        }
    }

    pub fn contains(&self, axis: NoteAxis, kind: ReportKind) -> bool {
        self.get(axis).contains(kind)
    }

    pub fn active(&self) -> &NoteSet {
        &self.active
    }

    pub fn main_package(&self) -> &NoteSet {
        &self.main_package
    }

    pub fn foreign_package(&self) -> &NoteSet {
        &self.foreign_package
    }

    pub fn warnings_as_errors(&self) -> &NoteSet {
        &self.warnings_as_errors
    }

    pub fn hints_as_errors(&self) -> &NoteSet {
        &self.hints_as_errors
    }

    pub fn cmdline_modified(&self) -> &NoteSet {
        &self.cmdline_modified
    }

    /// Every kind whose state was chosen by the user, on the command line or
    /// otherwise.
    pub fn any_modified(&self) -> NoteSet {
        self.cmdline_modified | self.explicit
    }

    fn is_sticky(&self, axis: NoteAxis, kind: ReportKind) -> bool {
        matches!(axis, NoteAxis::Active | NoteAxis::MainPackage)
            && self.cmdline_modified.contains(kind)
    }

    /// Sets membership of `kind` on one axis. Returns `false` when the write
    /// was ignored because the command line owns that kind.
    pub fn set(&mut self, axis: NoteAxis, kind: ReportKind, enabled: bool) -> bool {
        if self.is_sticky(axis, kind) {
            tracing::trace!(?kind, ?axis, "kept command-line note state");
            return false;
        }
        self.get_mut(axis).set(kind, enabled);
        if axis != NoteAxis::CmdlineModified {
            self.explicit.insert(kind);
        }
        true
    }

    /// Command-line write: marks `kind` as sticky and applies it to both the
    /// active and main-package sets (or to the given as-errors set). Turning a
    /// kind off also silences it for foreign packages.
    pub fn set_from_cmdline(&mut self, axis: NoteAxis, kind: ReportKind, enabled: bool) {
        self.cmdline_modified.insert(kind);
        match axis {
            NoteAxis::Active | NoteAxis::MainPackage => {
                self.active.set(kind, enabled);
                self.main_package.set(kind, enabled);
                if !enabled {
                    self.foreign_package.remove(kind);
                }
            }
            NoteAxis::CmdlineModified => {}
            other => self.get_mut(other).set(kind, enabled),
        }
    }

    /// Default assignment across the active, main-package and foreign-package
    /// sets. Sticky kinds keep their active and main-package state.
    pub fn set_defaults(&mut self, kind: ReportKind, enabled: bool) {
        for axis in [NoteAxis::Active, NoteAxis::MainPackage] {
            if !self.is_sticky(axis, kind) {
                self.get_mut(axis).set(kind, enabled);
            }
        }
        self.foreign_package.set(kind, enabled);
    }

    /// Switches the main-package notes to a verbosity preset while keeping
    /// the state of every kind the user modified, then reselects the active
    /// set for the module being processed.
    pub fn apply_verbosity(&mut self, tier: NoteSet) {
        let modified = self.any_modified();
        // Outside the main package `active` holds the foreign notes.
        let current = if self.in_main_package {
            self.active
        } else {
            self.main_package
        };
        let keep_enabled = modified & current;
        let unmodified = tier - modified;
        self.main_package = keep_enabled | unmodified;
        self.enter_module(self.in_main_package);
    }

    /// Replaces the foreign-package set wholesale, e.g. when a project opts in
    /// to diagnostics for its dependencies.
    pub fn replace_foreign_package(&mut self, set: NoteSet) {
        self.foreign_package = set;
    }

    /// Enters a module: picks the main-package or foreign-package notes as
    /// the active set.
    pub fn enter_module(&mut self, in_main_package: bool) {
        self.in_main_package = in_main_package;
        self.active = if in_main_package {
            self.main_package
        } else {
            self.foreign_package
        };
    }
}
