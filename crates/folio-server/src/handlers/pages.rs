//! Reader page endpoint.

use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use md5::{Digest, Md5};

use crate::handlers::{current_year, page_request};
use crate::state::AppState;

/// Handle GET / with `lang` and `chapter` query parameters.
pub(crate) async fn get_page(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let request = page_request(query.as_deref());
    let page = state.site.render_page(&request, current_year());

    let etag = compute_etag(&state.version, &page.html);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return StatusCode::NOT_MODIFIED.into_response();
    }

    tracing::debug!(
        language = %page.state.language(),
        chapter = page.state.chapter().unwrap_or_default(),
        "Rendered reader page"
    );

    (
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_string()),
        ],
        Html(page.html),
    )
        .into_response()
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
