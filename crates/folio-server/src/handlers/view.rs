//! View model endpoint.
//!
//! Returns the same state, view and metadata the reader page is built
//! from, for clients that render the page themselves.

use std::sync::Arc;

use axum::Json;
use axum::extract::{RawQuery, State};
use folio_site::PageView;

use crate::handlers::{current_year, page_request};
use crate::state::AppState;

/// Handle GET /api/view.
pub(crate) async fn get_view(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Json<PageView> {
    let request = page_request(query.as_deref());
    Json(state.site.page_view(&request, current_year()))
}
