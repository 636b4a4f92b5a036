//! Filesystem content store.
//!
//! Provides [`FsContentStore`] for reading chapter markdown from a local
//! content directory laid out as `{root}/{language}/{file}`.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use crate::storage::{ContentStore, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "fs";

/// Filesystem content store.
///
/// # Example
///
/// ```no_run
/// use folio_storage::{ContentStore, FsContentStore};
///
/// let store = FsContentStore::new("content");
/// let modified = store.modified("en", "intro.md")?;
/// # Ok::<(), folio_storage::StorageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    /// Create a store rooted at the content directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Content directory this store reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `(language, file)` to a path under the root.
    ///
    /// The language must be a single path segment. The file may be nested
    /// but cannot contain `..`, a root, or a drive prefix.
    fn resolve(&self, language: &str, file: &str) -> Result<PathBuf, StorageError> {
        let language_path = Path::new(language);
        let file_path = Path::new(file);

        let language_ok = !language.is_empty()
            && language_path.components().count() == 1
            && matches!(language_path.components().next(), Some(Component::Normal(_)));
        let file_ok = !file.is_empty()
            && file_path
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if !language_ok || !file_ok {
            return Err(StorageError::invalid_path(
                BACKEND,
                crate::content_path(language, file),
            ));
        }

        Ok(self.root.join(language_path).join(file_path))
    }
}

impl ContentStore for FsContentStore {
    fn read(&self, language: &str, file: &str) -> Result<String, StorageError> {
        let full_path = self.resolve(language, file)?;
        tracing::debug!(path = %full_path.display(), "Reading chapter");
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::from_io(BACKEND, crate::content_path(language, file), e))
    }

    fn modified(&self, language: &str, file: &str) -> Result<SystemTime, StorageError> {
        let full_path = self.resolve(language, file)?;
        fs::metadata(&full_path)
            .and_then(|meta| meta.modified())
            .map_err(|e| StorageError::from_io(BACKEND, crate::content_path(language, file), e))
    }
}
