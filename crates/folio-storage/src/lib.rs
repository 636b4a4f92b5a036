//! Chapter content storage for Folio.
//!
//! Chapters are markdown files addressed by a language code and a file name
//! (`content/{language}/{file}`). The [`ContentStore`] trait hides where they
//! actually live so the reader and the sitemap generator can be tested
//! without touching the filesystem.
//!
//! The crate provides:
//! - [`ContentStore`] with `read()`, `modified()` and `content_path()`
//! - [`FsContentStore`] for a content directory on disk
//! - [`MockContentStore`] for tests (behind the `mock` feature flag)
//!
//! # Example
//!
//! ```no_run
//! use folio_storage::{ContentStore, FsContentStore};
//!
//! let store = FsContentStore::new("content");
//! let markdown = store.read("en", "intro.md")?;
//! # Ok::<(), folio_storage::StorageError>(())
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsContentStore;
#[cfg(feature = "mock")]
pub use mock::MockContentStore;
pub use storage::{ContentStore, StorageError, StorageErrorKind, content_path};
