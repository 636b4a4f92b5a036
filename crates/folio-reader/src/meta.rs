//! Document metadata for a loaded chapter.
//!
//! Mirrors what search engines and social previews read: the `<title>`,
//! description and Open Graph/Twitter tags, the canonical URL, one
//! `hreflang` alternate per language and a schema.org `Book` JSON-LD block.

use folio_book::Book;
use folio_book::url::{page_url, resolve_asset_url};
use serde::Serialize;

use crate::state::State;
use crate::view::ChapterView;

/// Whether a meta tag is keyed by `name` or `property`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaKind {
    Name,
    Property,
}

impl MetaKind {
    /// Attribute name used in HTML.
    #[must_use]
    pub fn attribute(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Property => "property",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub kind: MetaKind,
    pub key: String,
    pub content: String,
}

/// `<link rel="alternate" hreflang=".." href="..">`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternateLink {
    pub hreflang: String,
    pub href: String,
}

/// Head metadata for a chapter page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub title: String,
    pub tags: Vec<MetaTag>,
    pub canonical: String,
    pub alternates: Vec<AlternateLink>,
    /// Pretty-printed JSON-LD.
    pub structured_data: String,
}

#[derive(Serialize)]
struct StructuredData<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
    #[serde(rename = "inLanguage")]
    in_language: Vec<&'a str>,
    url: &'a str,
    author: Person<'a>,
    description: &'a str,
}

#[derive(Serialize)]
struct Person<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
}

/// Base for canonical and alternate URLs.
///
/// The configured `site.baseUrl` wins, otherwise `fallback` (usually the
/// URL the page was requested at).
#[must_use]
pub fn canonical_base<'a>(book: &'a Book, fallback: &'a str) -> &'a str {
    book.site
        .base_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .unwrap_or(fallback)
}

impl PageMeta {
    /// Metadata for `state`, or `None` unless its chapter can be loaded.
    ///
    /// `base` is the canonical base, see [`canonical_base`].
    #[must_use]
    pub fn build(book: &Book, state: &State, chapter: &ChapterView, base: &str) -> Option<Self> {
        let ChapterView::Available {
            title, description, ..
        } = chapter
        else {
            return None;
        };

        let site = &book.site;
        let seo = book.seo();
        let mut tags = Vec::new();
        let mut push = |kind, key: &str, content: &str| {
            tags.push(MetaTag {
                kind,
                key: key.to_owned(),
                content: content.to_owned(),
            });
        };

        push(MetaKind::Name, "description", description);
        let keywords = seo.map(|s| s.keywords.join(", ")).unwrap_or_default();
        if !keywords.is_empty() {
            push(MetaKind::Name, "keywords", &keywords);
        }
        push(MetaKind::Property, "og:title", title);
        push(MetaKind::Property, "og:description", description);
        push(MetaKind::Property, "og:type", "book");
        if let Some(image) = seo
            .and_then(|s| s.social_image.as_deref())
            .filter(|image| !image.is_empty())
        {
            let image = resolve_asset_url(image, base);
            push(MetaKind::Property, "og:image", &image);
            push(MetaKind::Name, "twitter:image", &image);
        }
        push(MetaKind::Name, "twitter:card", "summary_large_image");
        push(MetaKind::Name, "twitter:title", title);
        push(MetaKind::Name, "twitter:description", description);
        if let Some(handle) = seo
            .and_then(|s| s.twitter.as_deref())
            .filter(|handle| !handle.is_empty())
        {
            push(MetaKind::Name, "twitter:creator", handle);
            push(MetaKind::Name, "twitter:site", handle);
        }

        let canonical = state.url(base);
        let alternates = book
            .languages()
            .iter()
            .map(|lang| AlternateLink {
                hreflang: lang.locale().to_owned(),
                href: page_url(base, &lang.code, state.chapter()),
            })
            .collect();

        let data = StructuredData {
            context: "https://schema.org",
            kind: "Book",
            name: title,
            in_language: book.languages().iter().map(|l| l.locale()).collect(),
            url: &canonical,
            author: Person {
                kind: "Person",
                name: &site.author,
            },
            description,
        };
        let structured_data = serde_json::to_string_pretty(&data).unwrap_or_default();

        Some(Self {
            title: format!("{title} · {}", site.title),
            tags,
            canonical,
            alternates,
            structured_data,
        })
    }

    /// Content of the tag keyed `key`, if present.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.content.as_str())
    }
}
