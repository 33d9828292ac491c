use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

pub const CACHE_DIR_NAME: &str = "nimcache";

#[derive(Debug, Error)]
#[error("cannot create cache directory {}: {source}", path.display())]
pub struct CacheDirError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// `<base>/nimcache`, where `base` is the output directory when one is set
/// and the project directory otherwise.
pub fn default_cache_dir(out_dir: Option<&Path>, project_dir: &Path) -> PathBuf {
    out_dir.unwrap_or(project_dir).join(CACHE_DIR_NAME)
}

pub fn ensure_dir(dir: &Path) -> Result<(), CacheDirError> {
    if dir.is_dir() {
        return Ok(());
    }
    tracing::debug!(dir = %dir.display(), "creating cache directory");
    fs::create_dir_all(dir).map_err(|source| CacheDirError {
        path: dir.to_path_buf(),
        source,
    })
}
