//! The per-compilation configuration object.
//!
//! One [`Config`] is built per invocation and passed by reference to every
//! phase. It owns the note sets, the option flags, the counters, the file
//! registry, the report bookkeeping and the module resolver. There is no
//! internal locking; parallel front ends give each worker its own copy and
//! share only a [`SharedRegistry`](crate::location::SharedRegistry).

mod cache;
mod constants;
mod dump;
mod options;
mod timestamp;


use std::{
    collections::{BTreeMap, HashSet},
    fmt,
    path::{Path, PathBuf},
    rc::Rc,
    sync::Arc,
};

pub use cache::{CACHE_DIR_NAME, CacheDirError};
pub use constants::{Constants, DEFAULT_DOC_BASE_URL, DEFAULT_VERBOSITY, SOURCE_EXT, STDLIB_DIRS};
pub use dump::{ConfigDump, DefinedSymbol};
pub use options::{Command, DebugFlag, Feature, GlobalOption, LocalOption, Options};
pub use timestamp::{SOURCE_DATE_EPOCH, clock_str, date_str, format_clock, format_date, timestamp_from};

use crate::location::{FileIndex, LocationRegistry, SourceLocation};
use crate::report::{NoteSets, ReportCenter, ReportHook};
use crate::resolve::ModuleResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub errors: usize,
    /// Error count at which an error report raises.
    pub error_max: usize,
    pub warnings: usize,
    pub hints: usize,
    pub exit_code: i32,
}

impl Default for Counters {
    fn default() -> Self {
        Self {
            errors: 0,
            error_max: 1,
            warnings: 0,
            hints: 0,
            exit_code: 0,
        }
    }
}

pub struct Config {
    pub(crate) constants: Arc<Constants>,
    pub(crate) hook: Option<Rc<dyn ReportHook>>,
    pub(crate) notes: NoteSets,
    pub options: Options,
    pub(crate) counters: Counters,
    pub(crate) files: LocationRegistry,
    pub(crate) reports: ReportCenter,
    pub(crate) resolver: ModuleResolver,
    pub(crate) defines: BTreeMap<String, String>,
    dylib_overrides: HashSet<String>,
    pub(crate) macros_to_expand: HashSet<String>,
    pub(crate) arc_to_expand: HashSet<String>,
    cache_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    verbosity: u8,
}

impl Config {
    pub fn new(constants: Arc<Constants>, hook: impl ReportHook + 'static) -> Self {
        let mut conf = Self::detached(constants);
        conf.hook = Some(Rc::new(hook));
        conf
    }

    /// Configuration without a delivery hook. Classification works; delivering
    /// an enabled report panics.
    pub fn detached(constants: Arc<Constants>) -> Self {
        let verbosity = DEFAULT_VERBOSITY;
        let notes = NoteSets::new(constants.tier(verbosity), constants.foreign_package_notes());
        let resolver = ModuleResolver::new(constants.stdlib_dirs().to_vec(), constants.source_ext());
        Self {
            constants,
            hook: None,
            notes,
            options: Options::default(),
            counters: Counters::default(),
            files: LocationRegistry::new(),
            reports: ReportCenter::new(),
            resolver,
            defines: BTreeMap::new(),
            dylib_overrides: HashSet::new(),
            macros_to_expand: HashSet::new(),
            arc_to_expand: HashSet::new(),
            cache_dir: None,
            out_dir: None,
            verbosity,
        }
    }

    /// Swaps the delivery hook. Test harnesses only.
    #[cfg(any(test, feature = "test-hooks"))]
    pub fn replace_hook(&mut self, hook: impl ReportHook + 'static) -> Option<Rc<dyn ReportHook>> {
        self.hook.replace(Rc::new(hook))
    }

    pub fn has_hook(&self) -> bool {
        self.hook.is_some()
    }

    pub fn constants(&self) -> &Arc<Constants> {
        &self.constants
    }

    // Note sets

    pub fn notes(&self) -> &NoteSets {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut NoteSets {
        &mut self.notes
    }

    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    /// Switches to verbosity preset `level`. Kinds the user set explicitly
    /// keep their state.
    pub fn set_verbosity(&mut self, level: u8) {
        self.verbosity = level.min(crate::report::MAX_VERBOSITY);
        let tier = self.constants.tier(self.verbosity);
        self.notes.apply_verbosity(tier);
        tracing::debug!(level = self.verbosity, "verbosity changed");
    }

    /// Activates the notes of the main package or of foreign packages for the
    /// module about to be processed.
    pub fn enter_module(&mut self, in_main_package: bool) {
        self.notes.enter_module(in_main_package);
    }

    // Counters

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn error_counter(&self) -> usize {
        self.counters.errors
    }

    pub fn warning_counter(&self) -> usize {
        self.counters.warnings
    }

    pub fn hint_counter(&self) -> usize {
        self.counters.hints
    }

    pub fn exit_code(&self) -> i32 {
        self.counters.exit_code
    }

    pub fn error_max(&self) -> usize {
        self.counters.error_max
    }

    /// Zero means "never raise on count"; it is stored as `usize::MAX`.
    pub fn set_error_max(&mut self, max: usize) {
        self.counters.error_max = if max == 0 { usize::MAX } else { max };
    }

    // Files and reports

    pub fn files(&self) -> &LocationRegistry {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut LocationRegistry {
        &mut self.files
    }

    pub fn reports(&self) -> &ReportCenter {
        &self.reports
    }

    pub fn reports_mut(&mut self) -> &mut ReportCenter {
        &mut self.reports
    }

    pub fn format_location(&self, location: SourceLocation) -> String {
        self.files.format_location(location, self.options.list_full_paths())
    }

    /// Registers `path` with a name relative to the project directory.
    pub fn register_file(&mut self, path: &Path) -> FileIndex {
        let project = self.resolver.project_path();
        let relative = path.strip_prefix(project).unwrap_or(path).to_path_buf();
        self.files.register_file(path, &relative)
    }

    // Resolution

    pub fn resolver(&self) -> &ModuleResolver {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut ModuleResolver {
        &mut self.resolver
    }

    /// Resolves an import and registers the resulting file.
    pub fn import_module(
        &mut self,
        specifier: &str,
        current_module_dir: &Path,
    ) -> Option<(PathBuf, FileIndex)> {
        let path = self.resolver.resolve(specifier, current_module_dir, false)?;
        let index = self.register_file(&path);
        Some((path, index))
    }

    // Symbols and overrides

    pub fn define_symbol(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.defines.insert(name.into(), value.into());
    }

    pub fn undefine_symbol(&mut self, name: &str) -> bool {
        self.defines.remove(name).is_some()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defines.contains_key(name)
    }

    pub fn symbol_value(&self, name: &str) -> Option<&str> {
        self.defines.get(name).map(String::as_str)
    }

    pub fn add_dylib_override(&mut self, lib: &str) {
        self.dylib_overrides.insert(canonical_dylib_name(lib));
    }

    pub fn is_dylib_overridden(&self, lib: &str) -> bool {
        self.dylib_overrides.contains(&canonical_dylib_name(lib))
    }

    pub fn expand_macro(&mut self, symbol: impl Into<String>) {
        self.macros_to_expand.insert(symbol.into());
    }

    pub fn expand_arc(&mut self, symbol: impl Into<String>) {
        self.arc_to_expand.insert(symbol.into());
    }

    // Cache directory

    pub fn set_out_dir(&mut self, dir: impl Into<PathBuf>) {
        self.out_dir = Some(dir.into());
    }

    pub fn set_cache_dir(&mut self, dir: impl Into<PathBuf>) {
        self.cache_dir = Some(dir.into());
    }

    pub fn cache_dir(&self) -> PathBuf {
        match &self.cache_dir {
            Some(dir) => dir.clone(),
            None => cache::default_cache_dir(self.out_dir.as_deref(), self.resolver.project_path()),
        }
    }

    /// Path of a generated file inside the cache directory, creating the
    /// directory first when `create_dir` is set.
    pub fn generated_file_path(&self, name: &str, create_dir: bool) -> Result<PathBuf, CacheDirError> {
        let dir = self.cache_dir();
        if create_dir {
            cache::ensure_dir(&dir)?;
        }
        Ok(dir.join(name))
    }
}

/// `libssl.so.1.1` and `ssl` name the same library.
fn canonical_dylib_name(lib: &str) -> String {
    let file = Path::new(lib)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| lib.to_string());
    let stem = file.strip_prefix("lib").unwrap_or(file.as_str());
    let end = stem.find(['(', ')', '.']).unwrap_or(stem.len());
    stem[..end].to_string()
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("has_hook", &self.hook.is_some())
            .field("options", &self.options)
            .field("counters", &self.counters)
            .field("verbosity", &self.verbosity)
            .field("files", &self.files.len())
            .finish_non_exhaustive()
    }
}
