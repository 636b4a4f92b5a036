//! Markdown to HTML conversion for chapter content.

use std::collections::HashSet;

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::text::{escape_html, slugify};

/// Slug used for headings whose text has no alphanumeric characters.
const EMPTY_SLUG: &str = "section";

/// Result of rendering a chapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Plain text of the first H1 heading, if any.
    pub title: Option<String>,
}

/// GitHub Flavored Markdown extensions used for every chapter.
const PARSER_OPTIONS: Options = Options::ENABLE_TABLES
    .union(Options::ENABLE_STRIKETHROUGH)
    .union(Options::ENABLE_TASKLISTS)
    .union(Options::ENABLE_GFM);

/// Chapter markdown renderer.
///
/// Stateless between calls: heading ids are deduplicated per `render`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChapterRenderer;

impl ChapterRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render chapter markdown to an HTML fragment.
    #[must_use]
    pub fn render(&self, markdown: &str) -> RenderResult {
        let mut events: Vec<Event<'_>> =
            Parser::new_ext(markdown, PARSER_OPTIONS).collect();

        let title = assign_heading_ids(&mut events);
        let events = events.into_iter().map(harden_external_link);

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events);

        RenderResult {
            html: output,
            title,
        }
    }
}

/// Give every heading without an explicit id a unique slug.
///
/// Returns the text of the first H1.
fn assign_heading_ids(events: &mut [Event<'_>]) -> Option<String> {
    let mut slugs = SlugRegistry::default();
    let mut title = None;

    for index in 0..events.len() {
        let Event::Start(Tag::Heading { level, id, .. }) = &events[index] else {
            continue;
        };
        let level = *level;
        let has_id = id.is_some();

        let text = heading_text(&events[index + 1..]);
        if level == HeadingLevel::H1 && title.is_none() {
            title = Some(text.trim().to_owned());
        }
        if has_id {
            continue;
        }

        let slug = slugs.unique(slugify(&text));
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[index] {
            *id = Some(CowStr::from(slug));
        }
    }

    title
}

/// Collect the plain text of a heading up to its end tag.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

/// Open absolute http(s) links in a new tab without leaking the opener.
fn harden_external_link(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Start(Tag::Link {
            ref dest_url,
            ref title,
            ..
        }) if dest_url.starts_with("http") => {
            let title_attr = if title.is_empty() {
                String::new()
            } else {
                format!(r#" title="{}""#, escape_html(title))
            };
            Event::InlineHtml(CowStr::from(format!(
                r#"<a href="{}"{title_attr} target="_blank" rel="noopener noreferrer">"#,
                escape_html(dest_url)
            )))
        }
        other => other,
    }
}

/// Tracks slugs already used in a chapter.
#[derive(Default)]
struct SlugRegistry {
    seen: HashSet<String>,
}

impl SlugRegistry {
    /// Return `base`, or `base-1`, `base-2`, ... if already taken.
    fn unique(&mut self, base: String) -> String {
        let base = if base.is_empty() {
            EMPTY_SLUG.to_owned()
        } else {
            base
        };
        if self.seen.insert(base.clone()) {
            return base;
        }
        (1..)
            .map(|n| format!("{base}-{n}"))
            .find(|candidate| self.seen.insert(candidate.clone()))
            .unwrap_or(base)
    }
}
