//! Static file serving.
//!
//! Chapter markdown is exposed under `/content` and site assets (logo,
//! stylesheet, social image) under `/assets`, both straight from disk.

use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Create router for the content and assets directories.
///
/// The assets route is only mounted when the directory exists.
pub(crate) fn static_router(state: &AppState) -> Router<Arc<AppState>> {
    let mut router = Router::new().nest_service("/content", ServeDir::new(&state.content_dir));

    if state.assets_dir.exists() {
        router = router.nest_service("/assets", ServeDir::new(&state.assets_dir));
    } else {
        tracing::debug!(path = %state.assets_dir.display(), "Assets directory not found");
    }

    router
}
