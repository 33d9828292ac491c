use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use super::{FileIndex, LocationRegistry};

/// Cross-worker file index allocator.
///
/// When modules are processed on several threads each worker keeps its own
/// resolver and note-set state; only index allocation goes through this
/// handle so indices stay globally unique and stable.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<LocationRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: LocationRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    pub fn register_file(&self, canonical_path: &Path, project_path: &Path) -> FileIndex {
        self.lock().register_file(canonical_path, project_path)
    }

    pub fn index_of(&self, path: &Path) -> Option<FileIndex> {
        self.lock().index_of(path)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Runs `f` with exclusive access to the registry.
    pub fn with<R>(&self, f: impl FnOnce(&mut LocationRegistry) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, LocationRegistry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
