use serde::Serialize;

use crate::enum_set::{EnumSet, set_element_enum};

set_element_enum! {
    /// Switches that apply to the whole compilation.
    pub enum GlobalOption {
        /// Style checks report as hints.
        StyleHint,
        /// Style checks report as errors.
        StyleError,
        /// Style checks only look at usages, not declarations.
        StyleUsages,
        /// Keep reporting non-diagnostic notes in IDE-tooling mode.
        IdeDebug,
        /// Render absolute paths instead of project-relative ones.
        ListFullPaths,
    }
}

set_element_enum! {
    /// Switches that can be toggled per module or per scope.
    pub enum LocalOption {
        Warnings,
        Hints,
    }
}

set_element_enum! {
    /// Experimental language features.
    pub enum Feature {
        StrictNotNil,
        StrictFuncs,
        Views,
    }
}

set_element_enum! {
    /// Developer tracing switches.
    pub enum DebugFlag {
        VmTrace,
        SemTrace,
        ParserTrace,
        CodegenTrace,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Command {
    #[default]
    Compile,
    Check,
    Doc,
    Dump,
    /// Serving an editor: suggestions, definitions, usages.
    IdeTools,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Options {
    pub global: EnumSet<GlobalOption>,
    pub local: EnumSet<LocalOption>,
    pub features: EnumSet<Feature>,
    pub debug: EnumSet<DebugFlag>,
    pub command: Command,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            global: EnumSet::empty(),
            local: EnumSet::from_slice(&[LocalOption::Warnings, LocalOption::Hints]),
            features: EnumSet::empty(),
            debug: EnumSet::empty(),
            command: Command::default(),
        }
    }
}

impl Options {
    pub fn hints_enabled(&self) -> bool {
        self.local.contains(LocalOption::Hints)
    }

    pub fn warnings_enabled(&self) -> bool {
        self.local.contains(LocalOption::Warnings)
    }

    /// Style checking is on at hint or error level.
    pub fn style_check_active(&self) -> bool {
        self.global.contains(GlobalOption::StyleHint) || self.global.contains(GlobalOption::StyleError)
    }

    pub fn style_as_error(&self) -> bool {
        self.global.contains(GlobalOption::StyleError)
    }

    pub fn is_ide_tooling(&self) -> bool {
        self.command == Command::IdeTools
    }

    pub fn list_full_paths(&self) -> bool {
        self.global.contains(GlobalOption::ListFullPaths)
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(feature)
    }

    pub fn has_debug(&self, flag: DebugFlag) -> bool {
        self.debug.contains(flag)
    }
}
