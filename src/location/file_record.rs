use std::{
    cell::OnceCell,
    fs,
    path::{Path, PathBuf},
};

use sha2::{Digest, Sha256};

use crate::paths::to_unix_string;

pub type ContentHash = [u8; 32];

/// Everything the compiler remembers about one registered file.
///
/// Display strings, source lines and the content hash are derived on first
/// access and cached. Changing the backing content through
/// [`FileRecord::set_dirty_file`] or [`FileRecord::set_content`] drops the
/// cached lines and hash.
#[derive(Debug, Clone)]
pub struct FileRecord {
    full_path: PathBuf,
    project_path: PathBuf,
    short_name: String,
    full_display: OnceCell<String>,
    project_display: OnceCell<String>,
    dirty_file: Option<PathBuf>,
    content: Option<String>,
    lines: OnceCell<Vec<String>>,
    hash: OnceCell<Option<ContentHash>>,
}

impl FileRecord {
    pub(crate) fn new(full_path: PathBuf, project_path: PathBuf) -> Self {
        let short_name = full_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            full_path,
            project_path,
            short_name,
            full_display: OnceCell::new(),
            project_display: OnceCell::new(),
            dirty_file: None,
            content: None,
            lines: OnceCell::new(),
            hash: OnceCell::new(),
        }
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Name used when rendering locations: the absolute path when
    /// `list_full_paths` is set, otherwise the project-relative one.
    pub fn display_name(&self, list_full_paths: bool) -> &str {
        if list_full_paths {
            self.full_display.get_or_init(|| to_unix_string(&self.full_path))
        } else {
            self.project_display
                .get_or_init(|| to_unix_string(&self.project_path))
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_file.is_some()
    }

    pub fn dirty_file(&self) -> Option<&Path> {
        self.dirty_file.as_deref()
    }

    /// Redirects reads of this file to `dirty`, as IDE tooling does for
    /// unsaved buffers. `None` goes back to the canonical path.
    pub fn set_dirty_file(&mut self, dirty: Option<PathBuf>) {
        self.dirty_file = dirty;
        self.invalidate();
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Replaces the buffered content. Takes precedence over any file on disk.
    pub fn set_content(&mut self, content: Option<String>) {
        self.content = content;
        self.invalidate();
    }

    /// Path the source is actually read from.
    pub fn backing_path(&self) -> &Path {
        self.dirty_file.as_deref().unwrap_or(&self.full_path)
    }

    pub fn lines(&self) -> &[String] {
        self.lines.get_or_init(|| {
            self.read_bytes()
                .map(|bytes| String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect())
                .unwrap_or_default()
        })
    }

    /// Text of the 1-based `line`, if the file has that many lines.
    pub fn line(&self, line: usize) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|index| self.lines().get(index))
            .map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines().len()
    }

    /// SHA-256 of the raw source bytes. `None` when the source cannot be
    /// read.
    pub fn content_hash(&self) -> Option<ContentHash> {
        *self
            .hash
            .get_or_init(|| self.read_bytes().map(|bytes| hash_bytes(&bytes)))
    }

    pub(crate) fn has_hash(&self) -> bool {
        self.hash.get().is_some()
    }

    pub(crate) fn store_hash(&mut self, hash: Option<ContentHash>) {
        self.hash = OnceCell::from(hash);
    }

    pub(crate) fn read_bytes(&self) -> Option<Vec<u8>> {
        read_backing_bytes(self.content.as_deref(), self.backing_path())
    }

    fn invalidate(&mut self) {
        self.lines = OnceCell::new();
        self.hash = OnceCell::new();
    }
}

pub fn hash_bytes(bytes: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

/// Buffered content wins over the file on disk.
pub(crate) fn read_backing_bytes(content: Option<&str>, path: &Path) -> Option<Vec<u8>> {
    if let Some(content) = content {
        return Some(content.as_bytes().to_vec());
    }
    match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "source not readable");
            None
        }
    }
}
