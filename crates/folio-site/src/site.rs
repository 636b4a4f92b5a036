//! Page request handling.
//!
//! [`Site`] ties the pieces together for one request: the query becomes a
//! [`State`], the state becomes a [`ReaderView`] and [`PageMeta`], and an
//! available chapter is read from the content store and rendered. Content
//! failures never escape: they become an inline error paragraph.

use std::sync::Arc;

use folio_book::Book;
use folio_reader::{ChapterView, PageMeta, ReaderView, State, canonical_base};
use folio_renderer::{ChapterRenderer, escape_html};
use folio_storage::ContentStore;
use serde::Serialize;

use crate::template::{PageData, render_document};

/// Base of language and chapter hrefs. Relative to the serving host, so a
/// local reader never jumps to the production `baseUrl`.
const LINK_BASE: &str = "/";

/// Query parameters of a reader page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub lang: Option<String>,
    pub chapter: Option<String>,
}

impl PageRequest {
    #[must_use]
    pub fn new(lang: Option<&str>, chapter: Option<&str>) -> Self {
        Self {
            lang: lang.map(str::to_owned),
            chapter: chapter.map(str::to_owned),
        }
    }
}

/// State, view and metadata for a request, without chapter content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub state: State,
    pub view: ReaderView,
    pub meta: Option<PageMeta>,
}

/// What fills the chapter content area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterBody {
    /// Fixed message for a missing or unavailable chapter.
    Placeholder(&'static str),
    /// Rendered markdown.
    Rendered { html: String, title: Option<String> },
    /// Content could not be loaded.
    Failed { path: String, message: String },
}

impl ChapterBody {
    /// HTML fragment for the content area.
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::Placeholder(message) => format!("<p>{}</p>", escape_html(message)),
            Self::Rendered { html, .. } => html.clone(),
            Self::Failed { path, message } => format!(
                "<p class=\"error\">Failed to load <code>{}</code>: {}</p>",
                escape_html(path),
                escape_html(message)
            ),
        }
    }
}

/// A fully rendered reader page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub state: State,
    pub view: ReaderView,
    pub meta: Option<PageMeta>,
    pub body: ChapterBody,
    /// Complete HTML document.
    pub html: String,
}

/// Renders reader pages for one book.
///
/// Holds no per-request state, so a single instance behind `Arc` serves
/// concurrent requests.
pub struct Site {
    book: Arc<Book>,
    store: Arc<dyn ContentStore>,
    renderer: ChapterRenderer,
    fallback_base: String,
}

impl Site {
    /// Create a site serving the reader at `/`.
    #[must_use]
    pub fn new(book: Arc<Book>, store: Arc<dyn ContentStore>) -> Self {
        Self {
            book,
            store,
            renderer: ChapterRenderer::new(),
            fallback_base: "/".to_owned(),
        }
    }

    /// Base for canonical URLs when the book has no `baseUrl`.
    #[must_use]
    pub fn with_fallback_base(mut self, url: impl Into<String>) -> Self {
        self.fallback_base = url.into();
        self
    }

    #[must_use]
    pub fn book(&self) -> &Book {
        &self.book
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    /// Base for canonical, alternate and structured-data URLs.
    #[must_use]
    pub fn canonical_base(&self) -> &str {
        canonical_base(&self.book, &self.fallback_base)
    }

    /// Resolve a request to its state, view and metadata.
    #[must_use]
    pub fn page_view(&self, request: &PageRequest, year: i32) -> PageView {
        let book = self.book.as_ref();
        let state = State::from_query(book, request.lang.as_deref(), request.chapter.as_deref());
        let view = ReaderView::build(book, &state, LINK_BASE, year);
        let meta = PageMeta::build(book, &state, &view.chapter, self.canonical_base());
        PageView { state, view, meta }
    }

    /// Render the complete reader page for a request.
    #[must_use]
    pub fn render_page(&self, request: &PageRequest, year: i32) -> RenderedPage {
        let PageView { state, view, meta } = self.page_view(request, year);
        let body = self.chapter_body(&state, &view.chapter);
        let body_html = body.to_html();

        let html = render_document(&PageData {
            view: &view,
            meta: meta.as_ref(),
            description: &self.book.site.description,
            body_html: &body_html,
        });

        RenderedPage {
            state,
            view,
            meta,
            body,
            html,
        }
    }

    fn chapter_body(&self, state: &State, chapter: &ChapterView) -> ChapterBody {
        let ChapterView::Available {
            file, content_path, ..
        } = chapter
        else {
            return ChapterBody::Placeholder(chapter.placeholder().unwrap_or_default());
        };

        match self.store.read(state.language(), file) {
            Ok(markdown) => {
                let result = self.renderer.render(&markdown);
                ChapterBody::Rendered {
                    html: result.html,
                    title: result.title,
                }
            }
            Err(err) => {
                tracing::warn!(
                    path = %content_path,
                    language = %state.language(),
                    error = %err,
                    "Failed to load chapter"
                );
                ChapterBody::Failed {
                    path: content_path.clone(),
                    message: err.reason(),
                }
            }
        }
    }
}
