use std::{
    fs,
    path::{Component, Path, PathBuf},
};

/// Resolves symlinks when the path exists, otherwise keeps it as given.
pub fn canonicalize_or_self(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Lexically removes `.` components and folds `..` into the preceding
/// component. Never touches the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                ) && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Renders a path with `/` separators regardless of platform.
pub fn to_unix_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Appends `ext` unless the path already carries an extension.
pub fn with_default_extension(name: &str, ext: &str) -> PathBuf {
    let path = PathBuf::from(name);
    if path.extension().is_some() {
        path
    } else {
        PathBuf::from(format!("{}.{}", name, ext))
    }
}
