use crate::report::{NoteSet, VerbosityTiers};

pub const DEFAULT_DOC_BASE_URL: &str = "https://nim-lang.org/docs";

/// Subdirectories of the library path that hold the standard library, in
/// search order.
pub const STDLIB_DIRS: &[&str] = &[
    "pure",
    "core",
    "arch",
    "pure/collections",
    "pure/concurrency",
    "pure/unidecode",
    "impure",
    "wrappers",
    "wrappers/linenoise",
    "windows",
    "posix",
    "js",
    "deprecated/pure",
];

pub const SOURCE_EXT: &str = "nim";

pub const DEFAULT_VERBOSITY: u8 = 1;

/// Values fixed for the lifetime of the process. Built once at startup and
/// shared between configurations through an `Arc`.
#[derive(Debug, Clone)]
pub struct Constants {
    doc_base_url: String,
    tiers: VerbosityTiers,
    stdlib_dirs: Vec<String>,
    source_ext: String,
    version: &'static str,
}

impl Constants {
    pub fn new() -> Self {
        Self::with_doc_base_url(DEFAULT_DOC_BASE_URL)
    }

    pub fn with_doc_base_url(url: impl Into<String>) -> Self {
        Self {
            doc_base_url: url.into().trim_end_matches('/').to_string(),
            tiers: VerbosityTiers::compute(),
            stdlib_dirs: STDLIB_DIRS.iter().map(|dir| dir.to_string()).collect(),
            source_ext: SOURCE_EXT.to_string(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    pub fn doc_base_url(&self) -> &str {
        &self.doc_base_url
    }

    /// Link to a documentation page, e.g. `doc_url("manual.html")`.
    pub fn doc_url(&self, page: &str) -> String {
        format!("{}/{}", self.doc_base_url, page.trim_start_matches('/'))
    }

    pub fn tiers(&self) -> &VerbosityTiers {
        &self.tiers
    }

    pub fn tier(&self, level: u8) -> NoteSet {
        self.tiers.tier(level)
    }

    pub fn foreign_package_notes(&self) -> NoteSet {
        self.tiers.foreign_package()
    }

    pub fn stdlib_dirs(&self) -> &[String] {
        &self.stdlib_dirs
    }

    pub fn source_ext(&self) -> &str {
        &self.source_ext
    }

    pub fn version(&self) -> &'static str {
        self.version
    }
}

impl Default for Constants {
    fn default() -> Self {
        Self::new()
    }
}
