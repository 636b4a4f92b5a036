//! Content store trait and error types.
//!
//! Chapters are addressed by `(language, file)` pairs. Implementations map
//! them onto `content/{language}/{file}` in whatever backend they wrap.

use std::time::SystemTime;

/// Why a chapter file could not be accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// The file does not exist.
    NotFound,
    /// The backend refused access.
    PermissionDenied,
    /// Language code or file name escapes the content directory.
    InvalidPath,
    /// Anything else the backend reported.
    Other,
}

impl StorageErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::PermissionDenied => "permission denied",
            Self::InvalidPath => "invalid path",
            Self::Other => "storage error",
        }
    }
}

impl From<std::io::ErrorKind> for StorageErrorKind {
    fn from(kind: std::io::ErrorKind) -> Self {
        match kind {
            std::io::ErrorKind::NotFound => Self::NotFound,
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Other,
        }
    }
}

/// Failure to access one chapter file.
///
/// `path` is always the public [`content_path`] of the file, so messages
/// read the same whichever backend produced them.
#[derive(Debug)]
pub struct StorageError {
    pub kind: StorageErrorKind,
    /// Public path, `content/{language}/{file}`.
    pub path: String,
    /// Store that reported the failure, e.g. `fs`.
    pub backend: &'static str,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    fn bare(kind: StorageErrorKind, backend: &'static str, path: String) -> Self {
        Self {
            kind,
            path,
            backend,
            source: None,
        }
    }

    /// The file does not exist in `backend`.
    #[must_use]
    pub fn missing(backend: &'static str, path: impl Into<String>) -> Self {
        Self::bare(StorageErrorKind::NotFound, backend, path.into())
    }

    /// The `(language, file)` pair does not name a file inside the store.
    #[must_use]
    pub fn invalid_path(backend: &'static str, path: impl Into<String>) -> Self {
        Self::bare(StorageErrorKind::InvalidPath, backend, path.into())
    }

    /// Wrap an I/O error, keeping its kind.
    #[must_use]
    pub fn from_io(backend: &'static str, path: impl Into<String>, err: std::io::Error) -> Self {
        let kind = err.kind().into();
        Self::failed(backend, path, err).with_kind(kind)
    }

    /// Wrap any backend error as [`StorageErrorKind::Other`].
    #[must_use]
    pub fn failed(
        backend: &'static str,
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::bare(StorageErrorKind::Other, backend, path.into())
        }
    }

    fn with_kind(mut self, kind: StorageErrorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Short message suitable for showing to a reader.
    ///
    /// Unlike `Display`, this leaves out the backend and path.
    #[must_use]
    pub fn reason(&self) -> String {
        self.source
            .as_ref()
            .map_or_else(|| self.kind.as_str().to_owned(), ToString::to_string)
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} store: {}: {}", self.backend, self.path, self.kind.as_str())?;
        if let Some(source) = &self.source {
            write!(f, " ({source})")?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Public path of a chapter file: `content/{language}/{file}`.
///
/// This is the path shown in error messages and used by the static
/// `/content` route, independent of where the store keeps the bytes.
#[must_use]
pub fn content_path(language: &str, file: &str) -> String {
    format!("content/{language}/{file}")
}

/// Read access to chapter markdown.
///
/// Implementations must be `Send + Sync` so the reader can be shared across
/// request handlers.
pub trait ContentStore: Send + Sync {
    /// Read the markdown of `file` in `language`.
    ///
    /// # Errors
    ///
    /// Returns `StorageErrorKind::NotFound` if the file doesn't exist,
    /// `StorageErrorKind::InvalidPath` if the pair escapes the content root.
    fn read(&self, language: &str, file: &str) -> Result<String, StorageError>;

    /// Last modification time of `file` in `language`.
    ///
    /// # Errors
    ///
    /// Same as [`ContentStore::read`].
    fn modified(&self, language: &str, file: &str) -> Result<SystemTime, StorageError>;

    /// Public path of the file, see [`content_path`].
    fn content_path(&self, language: &str, file: &str) -> String {
        content_path(language, file)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_from_io_keeps_kind() {
        let err = StorageError::from_io(
            "fs",
            "content/en/intro.md",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.path, "content/en/intro.md");
        assert!(err.source().is_some());

        let err = StorageError::from_io(
            "fs",
            "content/en/intro.md",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
    }

    #[test]
    fn test_display_with_source() {
        let err = StorageError::failed("fs", "content/en/intro.md", std::io::Error::other("disk full"));
        assert_eq!(err.to_string(), "fs store: content/en/intro.md: storage error (disk full)");
    }

    #[test]
    fn test_display_without_source() {
        let err = StorageError::invalid_path("mock", "content/../x.md");
        assert_eq!(err.to_string(), "mock store: content/../x.md: invalid path");
    }

    #[test]
    fn test_reason_prefers_source() {
        let err = StorageError::failed("fs", "content/en/a.md", std::io::Error::other("gone"));
        assert_eq!(err.reason(), "gone");
        assert_eq!(StorageError::missing("fs", "content/en/a.md").reason(), "not found");
    }

    #[test]
    fn test_content_path() {
        assert_eq!(content_path("fr", "intro.md"), "content/fr/intro.md");
    }

    #[test]
    fn test_storage_error_is_send_sync() {
        static_assertions::assert_impl_all!(StorageError: Send, Sync);
    }
}
