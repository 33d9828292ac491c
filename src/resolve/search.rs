use std::path::{Path, PathBuf};

use crate::paths::{canonicalize_or_self, with_default_extension};

use super::ModuleResolver;

impl ModuleResolver {
    /// Finds `name` through the search paths.
    ///
    /// Absolute names are checked directly. Relative names try, in order:
    /// the search paths, the search paths with a lowercased name, the lazy
    /// paths and the lazy paths with a lowercased name. With
    /// `suppress_stdlib`, search paths inside the library path are skipped.
    pub fn find_file(&mut self, name: &str, suppress_stdlib: bool) -> Option<PathBuf> {
        let file = with_default_extension(name, &self.source_ext);
        if file.is_absolute() {
            return file.is_file().then(|| canonicalize_or_self(&file));
        }

        let lowered = lowercase_variant(&file);
        let mut hit = self.find_in_search_paths(&file, suppress_stdlib);
        if hit.is_none()
            && let Some(lowered) = &lowered
        {
            hit = self.find_in_search_paths(lowered, suppress_stdlib);
        }
        if hit.is_none() {
            hit = self.find_in_lazy_paths(&file);
        }
        if hit.is_none()
            && let Some(lowered) = &lowered
        {
            hit = self.find_in_lazy_paths(lowered);
        }

        if hit.is_none() {
            tracing::trace!(name, "module not found");
        }
        hit.map(|path| canonicalize_or_self(&path))
    }

    fn find_in_search_paths(&self, file: &Path, suppress_stdlib: bool) -> Option<PathBuf> {
        for dir in &self.search_paths {
            if suppress_stdlib && self.is_in_lib_path(dir) {
                continue;
            }
            let candidate = dir.join(file);
            tracing::trace!(candidate = %candidate.display(), "probing search path");
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }

    fn find_in_lazy_paths(&mut self, file: &Path) -> Option<PathBuf> {
        let position = self.lazy_paths.iter().position(|dir| {
            let candidate = dir.join(file);
            tracing::trace!(candidate = %candidate.display(), "probing lazy path");
            candidate.is_file()
        })?;
        let candidate = self.lazy_paths[position].join(file);
        self.promote_lazy_path(position);
        Some(candidate)
    }

    /// Moves the lazy path at `index` to the front through adjacent swaps.
    /// Entries before it shift back by one and keep their order.
    pub(crate) fn promote_lazy_path(&mut self, index: usize) {
        if index == 0 || index >= self.lazy_paths.len() {
            return;
        }
        for j in (1..=index).rev() {
            self.lazy_paths.swap(j, j - 1);
        }
        tracing::debug!(path = %self.lazy_paths[0].display(), from = index, "promoted lazy path");
    }

    /// Looks `name` up in the standard-library subdirectories only. Nothing
    /// is found while the library path is unset.
    pub fn find_stdlib_file(&self, name: &str) -> Option<PathBuf> {
        if self.lib_path.as_os_str().is_empty() {
            return None;
        }
        let file = with_default_extension(name, &self.source_ext);
        self.stdlib_dirs.iter().find_map(|dir| {
            let candidate = self.lib_path.join(dir).join(&file);
            tracing::trace!(candidate = %candidate.display(), "probing stdlib");
            candidate.is_file().then(|| canonicalize_or_self(&candidate))
        })
    }

    pub(crate) fn is_in_lib_path(&self, path: &Path) -> bool {
        !self.lib_path.as_os_str().is_empty() && path.starts_with(&self.lib_path)
    }
}

fn lowercase_variant(file: &Path) -> Option<PathBuf> {
    let original = file.to_string_lossy();
    let lowered = original.to_lowercase();
    (lowered != original).then(|| PathBuf::from(lowered))
}
