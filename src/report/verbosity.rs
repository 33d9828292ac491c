//! Verbosity presets.
//!
//! Tier 3 is the noisiest, tier 0 the quietest. Each lower tier is derived
//! from the one above it by removing a fixed exclusion list, so the chain
//! `tier0 ⊆ tier1 ⊆ tier2 ⊆ tier3` holds by construction and the mandatory
//! base survives every step.

use serde::Serialize;

use super::{
    kind::{ReportKind, hint_kinds, warning_kinds},
    note_set::NoteSet,
};

/// Reported at every verbosity and for every package.
pub const MANDATORY_BASE: &[ReportKind] = &[
    ReportKind::EchoMessage,
    ReportKind::VersionInfo,
    ReportKind::HelpText,
];

/// Left out even at the highest verbosity.
const TIER3_EXCLUDED: &[ReportKind] = &[
    ReportKind::VmStackTrace,
    ReportKind::Uninit,
    ReportKind::ExtendedContext,
    ReportKind::ProcessingStmt,
];

const TIER2_EXCLUDED: &[ReportKind] = &[
    ReportKind::ProveField,
    ReportKind::GcUnsafe,
    ReportKind::Path,
    ReportKind::Dependency,
    ReportKind::GlobalVar,
    ReportKind::GcStats,
];

const TIER1_EXCLUDED: &[ReportKind] = &[
    ReportKind::Success,
    ReportKind::SuccessX,
    ReportKind::Conf,
    ReportKind::Processing,
    ReportKind::Pattern,
    ReportKind::Executing,
    ReportKind::Linking,
];

/// Extra kinds on top of the base for code outside the compiled package.
const FOREIGN_PACKAGE_EXTRA: &[ReportKind] = &[
    ReportKind::Processing,
    ReportKind::UserHint,
    ReportKind::UserWarning,
    ReportKind::UserError,
    ReportKind::QuitCalled,
];

pub const MAX_VERBOSITY: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerbosityTiers {
    tiers: [NoteSet; 4],
    base: NoteSet,
    foreign_package: NoteSet,
}

impl VerbosityTiers {
    pub fn compute() -> Self {
        let base = NoteSet::from_slice(MANDATORY_BASE);

        let tier3 = (base | warning_kinds().collect::<NoteSet>() | hint_kinds().collect::<NoteSet>())
            - NoteSet::from_slice(TIER3_EXCLUDED);
        let tier2 = tier3 - NoteSet::from_slice(TIER2_EXCLUDED);
        let tier1 = tier2 - NoteSet::from_slice(TIER1_EXCLUDED);
        // Quietest preset: warnings and user-issued notes only.
        let quiet: NoteSet = warning_kinds()
            .chain([ReportKind::UserHint, ReportKind::QuitCalled])
            .collect();
        let tier0 = base | (tier1 & quiet);

        Self {
            tiers: [tier0, tier1, tier2, tier3],
            base,
            foreign_package: base | NoteSet::from_slice(FOREIGN_PACKAGE_EXTRA),
        }
    }

    /// Preset for `level`; levels above the maximum saturate.
    pub fn tier(&self, level: u8) -> NoteSet {
        self.tiers[usize::from(level.min(MAX_VERBOSITY))]
    }

    pub fn base(&self) -> NoteSet {
        self.base
    }

    pub fn foreign_package(&self) -> NoteSet {
        self.foreign_package
    }
}

impl Default for VerbosityTiers {
    fn default() -> Self {
        Self::compute()
    }
}
