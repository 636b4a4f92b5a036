//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;

use folio_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Reader for the loaded book.
    pub(crate) site: Site,
    /// Application version for `ETag` computation.
    pub(crate) version: String,
    /// Directory served under `/content`.
    pub(crate) content_dir: PathBuf,
    /// Directory served under `/assets`.
    pub(crate) assets_dir: PathBuf,
}
