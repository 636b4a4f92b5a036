//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/", get(handlers::pages::get_page))
        .route("/index.html", get(handlers::pages::get_page))
        .route("/api/view", get(handlers::view::get_view))
        .route("/sitemap.xml", get(handlers::sitemap::get_sitemap))
        .route("/robots.txt", get(handlers::sitemap::get_robots));

    let router = routes.merge(static_files::static_router(&state)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new()),
    );
    security::apply(router).with_state(state)
}
