use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use thiserror::Error;

use crate::paths::normalize_lexically;

use super::{
    FileIndex, SourceLocation,
    file_record::{ContentHash, FileRecord, hash_bytes, read_backing_bytes},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no file registered under index {0}")]
    NotFound(FileIndex),
}

/// Owns every [`FileRecord`] of a compilation and hands out [`FileIndex`]es.
///
/// Indices are assigned sequentially from zero and never reused. Lookup by
/// path goes through the lexically normalized absolute path, so registering
/// the same file twice yields the same index.
#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    records: Vec<FileRecord>,
    by_path: HashMap<PathBuf, FileIndex>,
}

impl LocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_file(&mut self, canonical_path: &Path, project_path: &Path) -> FileIndex {
        let key = normalize_lexically(canonical_path);
        if let Some(index) = self.by_path.get(&key) {
            return *index;
        }

        let index = FileIndex::from_position(self.records.len());
        tracing::debug!(%index, path = %key.display(), "registered file");
        self.records
            .push(FileRecord::new(key.clone(), project_path.to_path_buf()));
        self.by_path.insert(key, index);
        index
    }

    pub fn index_of(&self, path: &Path) -> Option<FileIndex> {
        self.by_path.get(&normalize_lexically(path)).copied()
    }

    pub fn is_known(&self, path: &Path) -> bool {
        self.index_of(path).is_some()
    }

    pub fn lookup(&self, index: FileIndex) -> Result<&FileRecord, LookupError> {
        index
            .position()
            .and_then(|position| self.records.get(position))
            .ok_or(LookupError::NotFound(index))
    }

    pub fn lookup_mut(&mut self, index: FileIndex) -> Result<&mut FileRecord, LookupError> {
        index
            .position()
            .and_then(|position| self.records.get_mut(position))
            .ok_or(LookupError::NotFound(index))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileIndex, &FileRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(position, record)| (FileIndex::from_position(position), record))
    }

    /// Key for per-location tables such as profiling accumulators. Injective
    /// over `(line, col, file)` and identical for every run of the process.
    pub fn hash_location(location: SourceLocation) -> u64 {
        let line = u64::from(location.line);
        let col = u64::from(location.col as u16);
        let file = u64::from(location.file.as_i32() as u32);
        (file << 32) | (col << 16) | line
    }

    /// `file(line, col)` rendering used for instantiation trails.
    pub fn format_location(&self, location: SourceLocation, list_full_paths: bool) -> String {
        let file = match location.file {
            FileIndex::COMMAND_LINE => "command line",
            FileIndex::INVALID | FileIndex::TRACK_SUPPRESSED => "???",
            index => match self.lookup(index) {
                Ok(record) => record.display_name(list_full_paths),
                Err(_) => "???",
            },
        };
        if location.has_column() {
            format!("{}({}, {})", file, location.line, location.col)
        } else {
            format!("{}({})", file, location.line)
        }
    }

    pub fn source_line(&self, location: SourceLocation) -> Option<&str> {
        self.lookup(location.file)
            .ok()?
            .line(usize::from(location.line))
    }

    /// Computes the content hash of every record that has none yet, reading
    /// the sources in parallel.
    pub fn hash_all_contents(&mut self) {
        let pending: Vec<(usize, Option<String>)> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| !record.has_hash())
            .map(|(position, record)| (position, record.content().map(str::to_string)))
            .collect();
        if pending.is_empty() {
            return;
        }

        let paths: Vec<PathBuf> = pending
            .iter()
            .map(|(position, _)| self.records[*position].backing_path().to_path_buf())
            .collect();

        let hashes: Vec<Option<ContentHash>> = pending
            .par_iter()
            .zip(paths.par_iter())
            .map(|((_, content), path)| {
                read_backing_bytes(content.as_deref(), path).map(|bytes| hash_bytes(&bytes))
            })
            .collect();

        tracing::debug!(files = hashes.len(), "hashed file contents");
        for ((position, _), hash) in pending.into_iter().zip(hashes) {
            self.records[position].store_hash(hash);
        }
    }
}
