//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_sitemap::SitemapError;
use serde_json::json;

/// Failure of a generated endpoint.
///
/// Page rendering never fails; content errors are shown inline instead.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Sitemap error: {0}")]
    Sitemap(#[from] SitemapError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        let body = match &self {
            Self::Sitemap(SitemapError::Storage(err)) => json!({
                "error": "Sitemap generation failed",
                "path": err.path,
                "detail": err.reason(),
            }),
            Self::Sitemap(err) => json!({
                "error": "Sitemap generation failed",
                "detail": err.to_string(),
            }),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body;
    use folio_storage::StorageError;

    use super::*;

    #[tokio::test]
    async fn test_storage_failure_names_path() {
        let err = ServerError::from(SitemapError::from(StorageError::failed(
            "fs",
            "content/en/intro.md",
            std::io::Error::other("disk full"),
        )));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["path"], "content/en/intro.md");
        assert_eq!(json["detail"], "disk full");
    }
}
