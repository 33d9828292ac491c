use std::path::{Path, PathBuf};

use crate::paths::to_unix_string;

use super::{ModuleResolver, STDLIB_PREFIX};

impl ModuleResolver {
    /// Path of `file` relative to where it would be found by an import.
    ///
    /// Standard-library modules get their title form `std/<file name>`;
    /// anything else is made relative to the first search path, then lazy
    /// path, that contains it.
    pub fn relative_to_search_path(&self, file: &Path) -> Option<PathBuf> {
        let file_name = file.file_name()?;
        for dir in &self.stdlib_dirs {
            if self.lib_path.join(dir).join(file_name) == file {
                return Some(PathBuf::from(STDLIB_PREFIX).join(file_name));
            }
        }
        self.search_paths
            .iter()
            .chain(&self.lazy_paths)
            .find_map(|dir| file.strip_prefix(dir).ok())
            .filter(|relative| !relative.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }

    /// The shortest import name for `file`, with `/` separators and no
    /// extension.
    ///
    /// Picks the shorter of the search-path relative form and the form
    /// relative to the owning package root, and falls back to a path
    /// relative to the project directory.
    pub fn canonical_import_name(&self, file: &Path) -> String {
        let mut best = self.relative_to_search_path(file);

        if let Some(root) = self.package_root(file)
            && let Ok(relative) = file.strip_prefix(&root)
            && !relative.as_os_str().is_empty()
        {
            let shorter = best
                .as_ref()
                .is_none_or(|current| relative.as_os_str().len() < current.as_os_str().len());
            if shorter {
                best = Some(relative.to_path_buf());
            }
        }

        let name = best.unwrap_or_else(|| {
            file.strip_prefix(&self.project_path)
                .unwrap_or(file)
                .to_path_buf()
        });
        to_unix_string(&name.with_extension(""))
    }
}
