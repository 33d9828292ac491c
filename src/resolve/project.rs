//! Project and package discovery.

use std::{
    fs,
    path::{Path, PathBuf},
};

use super::ModuleResolver;

/// Project descriptor extensions, highest priority first.
pub const PROJECT_EXTENSIONS: &[&str] = &["nims", "cfg", "nimcfg", "nimble"];

const PACKAGE_EXT: &str = "nimble";
const SHARED_CONFIG: &str = "config.nims";
const STDLIB_PACKAGE: &str = "stdlib";
const UNKNOWN_PACKAGE: &str = "unknown";

/// Finds the main module of the project in `dir` or the nearest ancestor
/// that has one.
///
/// Every descriptor `foo.<ext>` with a sibling `foo.nim` names a candidate.
/// Once a package descriptor has been seen its stem names the package,
/// otherwise the directory name does. A candidate named exactly after the
/// package wins, then (for descriptor names only) one whose name contains
/// it, otherwise the first by extension priority. Seeing a second package
/// descriptor makes the search give up.
pub fn find_project_file(dir: &Path) -> Option<PathBuf> {
    let mut package_descriptor: Option<(String, String)> = None;
    let mut current = Some(dir);

    while let Some(dir) = current {
        let mut candidates: Vec<(usize, PathBuf)> = Vec::new();
        for (name, stem, ext) in descriptor_files(dir) {
            let Some(priority) = PROJECT_EXTENSIONS.iter().position(|known| *known == ext) else {
                continue;
            };
            let main = dir.join(format!("{stem}.nim"));
            if main.is_file() && !candidates.iter().any(|(_, seen)| *seen == main) {
                candidates.push((priority, main));
            }
            if ext == PACKAGE_EXT {
                if let Some((first, _)) = &package_descriptor {
                    tracing::warn!(
                        first = %first,
                        second = %name,
                        dir = %dir.display(),
                        "several package descriptors, not guessing a project file"
                    );
                    return None;
                }
                package_descriptor = Some((name, stem));
            }
        }
        candidates.sort_by_key(|(priority, _)| *priority);

        let chosen = match &package_descriptor {
            Some((_, package)) => {
                named_exactly(&candidates, package).or_else(|| {
                    candidates
                        .iter()
                        .find(|(_, path)| file_stem(path).contains(package.as_str()))
                })
            }
            None => dir
                .file_name()
                .and_then(|name| named_exactly(&candidates, &name.to_string_lossy())),
        };
        if let Some((_, path)) = chosen.or(candidates.first()) {
            return Some(path.clone());
        }
        current = dir.parent();
    }
    None
}

fn named_exactly<'a>(candidates: &'a [(usize, PathBuf)], name: &str) -> Option<&'a (usize, PathBuf)> {
    candidates.iter().find(|(_, path)| file_stem(path) == name)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `(file name, stem, extension)` of the regular files in `dir`, sorted by
/// name. The shared `config.nims` is not a project descriptor.
fn descriptor_files(dir: &Path) -> Vec<(String, String, String)> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<_> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| {
            let path = entry.path();
            let name = path.file_name()?.to_string_lossy().into_owned();
            if name == SHARED_CONFIG {
                return None;
            }
            let stem = path.file_stem()?.to_string_lossy().into_owned();
            let ext = path.extension()?.to_string_lossy().into_owned();
            Some((name, stem, ext))
        })
        .collect();
    files.sort();
    files
}

impl ModuleResolver {
    /// The package descriptor owning `path`: the first `*.nimble` file found
    /// walking up from the file's directory. Results are cached per
    /// directory.
    pub fn package_descriptor(&self, path: &Path) -> Option<PathBuf> {
        let start = path.parent()?;
        let mut visited = Vec::new();
        let mut found = None;

        for dir in start.ancestors() {
            if let Some(cached) = self.package_cache.borrow().get(dir) {
                found = cached.clone();
                break;
            }
            visited.push(dir.to_path_buf());
            let mut descriptors: Vec<PathBuf> = descriptor_files(dir)
                .into_iter()
                .filter(|(_, _, ext)| ext == PACKAGE_EXT)
                .map(|(name, _, _)| dir.join(name))
                .collect();
            match descriptors.len() {
                0 => continue,
                1 => found = descriptors.pop(),
                _ => tracing::warn!(dir = %dir.display(), "several package descriptors"),
            }
            break;
        }

        let mut cache = self.package_cache.borrow_mut();
        for dir in visited {
            cache.insert(dir, found.clone());
        }
        found
    }

    /// Name of the package `path` belongs to: the stem of its package
    /// descriptor, `stdlib` inside the library path, `unknown` otherwise.
    pub fn package_name(&self, path: &Path) -> String {
        if let Some(descriptor) = self.package_descriptor(path)
            && let Some(stem) = descriptor.file_stem()
        {
            return stem.to_string_lossy().into_owned();
        }
        if self.is_in_lib_path(path) {
            STDLIB_PACKAGE.to_string()
        } else {
            UNKNOWN_PACKAGE.to_string()
        }
    }

    /// Directory holding the package descriptor of `path`.
    pub fn package_root(&self, path: &Path) -> Option<PathBuf> {
        self.package_descriptor(path)
            .and_then(|descriptor| descriptor.parent().map(Path::to_path_buf))
    }
}
