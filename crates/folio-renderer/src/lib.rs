//! Chapter markdown rendering.
//!
//! Wraps `pulldown-cmark` with the tweaks the reader relies on:
//! - GitHub Flavored Markdown (tables, strikethrough, task lists)
//! - an `id` slug on every heading, deduplicated within a chapter
//! - external links opened in a new tab with `rel="noopener noreferrer"`
//! - the first H1 extracted as the chapter's rendered title
//!
//! # Example
//!
//! ```
//! use folio_renderer::ChapterRenderer;
//!
//! let result = ChapterRenderer::new().render("# Hello\n\nSee [docs](https://example.org).");
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! assert!(result.html.contains(r#"<h1 id="hello">Hello</h1>"#));
//! assert!(result.html.contains(r#"rel="noopener noreferrer""#));
//! ```

mod renderer;
mod text;

pub use renderer::{ChapterRenderer, RenderResult};
pub use text::{escape_html, slugify};
