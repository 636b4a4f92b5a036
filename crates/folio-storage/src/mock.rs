//! Mock content store for testing.
//!
//! Provides [`MockContentStore`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::SystemTime;

use crate::storage::{ContentStore, StorageError, content_path};

/// Backend identifier for error messages.
const BACKEND: &str = "mock";

type Key = (String, String);

fn key(language: &str, file: &str) -> Key {
    (language.to_owned(), file.to_owned())
}

/// In-memory content store.
///
/// Use the builder methods to configure the mock with test data. Files
/// without an explicit mtime report `UNIX_EPOCH`.
///
/// # Example
///
/// ```ignore
/// use folio_storage::{ContentStore, MockContentStore};
///
/// let store = MockContentStore::new()
///     .with_content("en", "intro.md", "# Introduction");
///
/// assert_eq!(store.read("en", "intro.md").unwrap(), "# Introduction");
/// ```
#[derive(Debug, Default)]
pub struct MockContentStore {
    contents: RwLock<HashMap<Key, String>>,
    mtimes: RwLock<HashMap<Key, SystemTime>>,
    failures: RwLock<HashMap<Key, String>>,
}

impl MockContentStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add markdown for `(language, file)`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_content(
        self,
        language: &str,
        file: &str,
        content: impl Into<String>,
    ) -> Self {
        self.contents
            .write()
            .unwrap()
            .insert(key(language, file), content.into());
        self
    }

    /// Set the modification time reported for `(language, file)`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_mtime(self, language: &str, file: &str, mtime: SystemTime) -> Self {
        self.mtimes
            .write()
            .unwrap()
            .insert(key(language, file), mtime);
        self
    }

    /// Make every access to `(language, file)` fail with `message`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, language: &str, file: &str, message: impl Into<String>) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(key(language, file), message.into());
        self
    }

    fn check(&self, language: &str, file: &str) -> Result<(), StorageError> {
        let failures = self.failures.read().unwrap();
        if let Some(message) = failures.get(&key(language, file)) {
            return Err(StorageError::failed(
                BACKEND,
                content_path(language, file),
                std::io::Error::other(message.clone()),
            ));
        }
        if !self.contents.read().unwrap().contains_key(&key(language, file)) {
            return Err(StorageError::missing(BACKEND, content_path(language, file)));
        }
        Ok(())
    }
}

impl ContentStore for MockContentStore {
    fn read(&self, language: &str, file: &str) -> Result<String, StorageError> {
        self.check(language, file)?;
        let contents = self.contents.read().unwrap();
        contents
            .get(&key(language, file))
            .cloned()
            .ok_or_else(|| StorageError::missing(BACKEND, content_path(language, file)))
    }

    fn modified(&self, language: &str, file: &str) -> Result<SystemTime, StorageError> {
        self.check(language, file)?;
        Ok(self
            .mtimes
            .read()
            .unwrap()
            .get(&key(language, file))
            .copied()
            .unwrap_or(SystemTime::UNIX_EPOCH))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::StorageErrorKind;

    #[test]
    fn test_read_configured_content() {
        let store = MockContentStore::new().with_content("en", "intro.md", "Hello");
        assert_eq!(store.read("en", "intro.md").unwrap(), "Hello");
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let store = MockContentStore::new();
        let err = store.read("fr", "intro.md").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.to_string(), "mock store: content/fr/intro.md: not found");
    }

    #[test]
    fn test_injected_failure() {
        let store = MockContentStore::new()
            .with_content("en", "intro.md", "Hello")
            .with_failure("en", "intro.md", "disk on fire");
        let err = store.read("en", "intro.md").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::Other);
        assert_eq!(err.reason(), "disk on fire");
        assert!(store.modified("en", "intro.md").is_err());
    }

    #[test]
    fn test_modified_defaults_to_epoch() {
        let when = SystemTime::UNIX_EPOCH + Duration::from_secs(42);
        let store = MockContentStore::new()
            .with_content("en", "a.md", "")
            .with_content("en", "b.md", "")
            .with_mtime("en", "b.md", when);
        assert_eq!(store.modified("en", "a.md").unwrap(), SystemTime::UNIX_EPOCH);
        assert_eq!(store.modified("en", "b.md").unwrap(), when);
    }
}
