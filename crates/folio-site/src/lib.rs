//! Reader page assembly for Folio.
//!
//! This crate provides:
//! - [`Site`]: resolves a page request to a state, loads and renders the
//!   chapter, and produces the final HTML document
//! - [`template`]: the static HTML shell the view model is applied to
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use std::sync::Arc;
//! use folio_book::Book;
//! use folio_site::{PageRequest, Site};
//! use folio_storage::FsContentStore;
//!
//! let book = Arc::new(Book::load(Path::new("config/site.config.json"))?);
//! let store = Arc::new(FsContentStore::new("content"));
//! let site = Site::new(book, store);
//!
//! let page = site.render_page(&PageRequest::new(Some("fr"), Some("intro")), 2024);
//! println!("{}", page.html);
//! # Ok(())
//! # }
//! ```

mod site;
pub mod template;

pub use site::{ChapterBody, PageRequest, PageView, RenderedPage, Site};
