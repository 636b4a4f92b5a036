//! Sitemap and robots endpoints.
//!
//! Both documents are generated per request from the loaded book, using
//! the same base URL as canonical links.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use folio_sitemap::{SitemapGenerator, render_robots, render_sitemap};

use crate::error::ServerError;
use crate::state::AppState;

fn generator(state: &AppState) -> SitemapGenerator<'_> {
    let site = &state.site;
    SitemapGenerator::new(site.book(), site.store().as_ref())
        .with_base_url(site.canonical_base())
}

/// Handle GET /sitemap.xml.
pub(crate) async fn get_sitemap(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let entries = generator(&state).entries()?;
    let xml = render_sitemap(&entries)?;
    Ok(([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml))
}

/// Handle GET /robots.txt.
pub(crate) async fn get_robots(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let robots = render_robots(&generator(&state).base_url());
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], robots)
}
