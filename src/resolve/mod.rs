//! Module resolution.
//!
//! Import specifiers come in three forms:
//!
//! - `pkg/name` searches the ordinary search paths and never the standard
//!   library;
//! - `std/name` searches only the standard-library subdirectories of the
//!   library path;
//! - a bare `name` is tried next to the importing module, then through the
//!   search paths and finally the lazy dependency paths.
//!
//! After a hit, the module override table may replace the result.

mod canonical;
mod project;
mod search;


use std::{
    cell::RefCell,
    collections::HashMap,
    path::{Path, PathBuf},
};

pub use project::{PROJECT_EXTENSIONS, find_project_file};

use crate::paths::{canonicalize_or_self, with_default_extension};

pub const PACKAGE_PREFIX: &str = "pkg/";
pub const STDLIB_PREFIX: &str = "std/";

#[derive(Debug, Clone, Default)]
pub struct ModuleResolver {
    lib_path: PathBuf,
    project_path: PathBuf,
    search_paths: Vec<PathBuf>,
    lazy_paths: Vec<PathBuf>,
    /// Keyed by (package name, module stem).
    module_overrides: HashMap<(String, String), PathBuf>,
    stdlib_dirs: Vec<String>,
    source_ext: String,
    /// Nearest package descriptor per directory, `None` when there is none.
    package_cache: RefCell<HashMap<PathBuf, Option<PathBuf>>>,
}

impl ModuleResolver {
    pub fn new(stdlib_dirs: Vec<String>, source_ext: &str) -> Self {
        Self {
            stdlib_dirs,
            source_ext: source_ext.to_string(),
            ..Self::default()
        }
    }

    pub fn lib_path(&self) -> &Path {
        &self.lib_path
    }

    pub fn set_lib_path(&mut self, path: impl Into<PathBuf>) {
        self.lib_path = canonicalize_or_self(&path.into());
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn set_project_path(&mut self, path: impl Into<PathBuf>) {
        self.project_path = canonicalize_or_self(&path.into());
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Appends a search path. Duplicates are ignored.
    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) {
        let path = canonicalize_or_self(&path.into());
        if !self.search_paths.contains(&path) {
            self.search_paths.push(path);
        }
    }

    pub fn lazy_paths(&self) -> &[PathBuf] {
        &self.lazy_paths
    }

    pub fn add_lazy_path(&mut self, path: impl Into<PathBuf>) {
        let path = canonicalize_or_self(&path.into());
        if !self.lazy_paths.contains(&path) {
            self.lazy_paths.push(path);
        }
    }

    pub fn stdlib_dirs(&self) -> &[String] {
        &self.stdlib_dirs
    }

    /// Redirects module `module` of package `package` to `path`. An empty
    /// path leaves resolution untouched.
    pub fn set_module_override(
        &mut self,
        package: impl Into<String>,
        module: impl Into<String>,
        path: impl Into<PathBuf>,
    ) {
        self.module_overrides
            .insert((package.into(), module.into()), path.into());
    }

    pub fn resolve(
        &mut self,
        specifier: &str,
        current_module_dir: &Path,
        suppress_stdlib: bool,
    ) -> Option<PathBuf> {
        let found = if let Some(rest) = specifier.strip_prefix(PACKAGE_PREFIX) {
            self.find_file(rest, true)
        } else if let Some(rest) = specifier.strip_prefix(STDLIB_PREFIX) {
            self.find_stdlib_file(rest)
        } else {
            let local = current_module_dir.join(with_default_extension(specifier, &self.source_ext));
            tracing::trace!(candidate = %local.display(), "probing importer directory");
            if local.is_file() {
                Some(canonicalize_or_self(&local))
            } else {
                self.find_file(specifier, suppress_stdlib)
            }
        };
        found.map(|path| self.apply_override(path))
    }

    fn apply_override(&self, path: PathBuf) -> PathBuf {
        if self.module_overrides.is_empty() {
            return path;
        }
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            return path;
        };
        let key = (self.package_name(&path), stem);
        match self.module_overrides.get(&key) {
            Some(replacement) if !replacement.as_os_str().is_empty() => {
                tracing::debug!(
                    package = %key.0,
                    module = %key.1,
                    to = %replacement.display(),
                    "module override applied"
                );
                replacement.clone()
            }
            _ => path,
        }
    }
}
