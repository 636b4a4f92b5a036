//! HTTP server for the Folio reader.
//!
//! This crate serves the reader with axum:
//! - `GET /?lang=..&chapter=..`: the server-rendered reader page
//! - `GET /api/view`: state, view model and metadata as JSON
//! - `GET /sitemap.xml` and `GET /robots.txt`, generated per request
//! - `/content/*` and `/assets/*` straight from disk
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 7878,
//!         book_path: PathBuf::from("config/site.config.json"),
//!         content_dir: PathBuf::from("content"),
//!         assets_dir: PathBuf::from("assets"),
//!         base_url: None,
//!         version: "0.1.0".to_string(),
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use folio_book::Book;
use folio_site::Site;
use folio_storage::FsContentStore;
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Book descriptor (`site.config.json`).
    pub book_path: PathBuf,
    /// Directory holding `{language}/{file}` chapter markdown.
    pub content_dir: PathBuf,
    /// Directory served under `/assets`.
    pub assets_dir: PathBuf,
    /// Override for the book's `site.baseUrl`.
    pub base_url: Option<String>,
    /// Application version (part of the `ETag`).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            book_path: PathBuf::from("config/site.config.json"),
            content_dir: PathBuf::from("content"),
            assets_dir: PathBuf::from("assets"),
            base_url: None,
            version: String::new(),
        }
    }
}

impl ServerConfig {
    /// URL the server is reachable at, used when the book has no base URL.
    #[must_use]
    pub fn local_url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the book cannot be loaded or the server fails to
/// start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut book = Book::load(&config.book_path)?;
    if let Some(base_url) = &config.base_url {
        book = book.with_base_url(base_url.clone());
    }

    let store = Arc::new(FsContentStore::new(config.content_dir.clone()));
    let site = Site::new(Arc::new(book), store).with_fallback_base(config.local_url());

    let state = Arc::new(AppState {
        site,
        version: config.version.clone(),
        content_dir: config.content_dir.clone(),
        assets_dir: config.assets_dir.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for Ctrl+C");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from the tool configuration.
#[must_use]
pub fn server_config_from_folio_config(config: &folio_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        book_path: config.book_resolved.config_file.clone(),
        content_dir: config.book_resolved.content_dir.clone(),
        assets_dir: config.book_resolved.assets_dir.clone(),
        base_url: config.book_resolved.base_url.clone(),
        version,
    }
}
