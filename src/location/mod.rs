//! Source locations and the registry of files the compiler has seen.

use std::fmt;

use serde::Serialize;

mod file_record;
mod registry;
mod shared;

pub use file_record::{ContentHash, FileRecord};
pub use registry::{LocationRegistry, LookupError};
pub use shared::SharedRegistry;

/// Stable identifier of a registered source file.
///
/// Non-negative values index the registry in registration order. The negative
/// values are reserved sentinels and never refer to a registered file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FileIndex(i32);

impl FileIndex {
    /// Location of unknown origin.
    pub const INVALID: FileIndex = FileIndex(-1);
    /// Suppresses IDE suggestions inside comments and string literals.
    pub const TRACK_SUPPRESSED: FileIndex = FileIndex(-2);
    /// Synthetic locations for definitions made on the command line.
    pub const COMMAND_LINE: FileIndex = FileIndex(-3);

    pub(crate) fn from_position(position: usize) -> Self {
        FileIndex(i32::try_from(position).unwrap_or(i32::MAX))
    }

    pub fn as_i32(self) -> i32 {
        self.0
    }

    pub fn is_sentinel(self) -> bool {
        self.0 < 0
    }

    pub(crate) fn position(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl fmt::Display for FileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in a source file. `col == -1` means the column is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLocation {
    pub line: u16,
    pub col: i16,
    pub file: FileIndex,
}

impl SourceLocation {
    /// Builds a location, saturating line and column into their storage range.
    pub fn new(file: FileIndex, line: u32, col: i32) -> Self {
        Self {
            line: u16::try_from(line).unwrap_or(u16::MAX),
            col: col.clamp(-1, i32::from(i16::MAX)) as i16,
            file,
        }
    }

    pub fn unknown() -> Self {
        Self {
            line: 0,
            col: -1,
            file: FileIndex::INVALID,
        }
    }

    pub fn command_line() -> Self {
        Self {
            line: 1,
            col: 1,
            file: FileIndex::COMMAND_LINE,
        }
    }

    pub fn is_known(&self) -> bool {
        self.file != FileIndex::INVALID
    }

    pub fn has_column(&self) -> bool {
        self.col >= 0
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::unknown()
    }
}
