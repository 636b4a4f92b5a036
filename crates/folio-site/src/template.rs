//! HTML document template for the reader page.
//!
//! The markup keeps the element ids of the reader shell (`site-title`,
//! `language-switcher`, `chapter-list`, `chapter-content`, ...) so existing
//! stylesheets keep working. Every piece of text and every attribute value
//! is escaped; only the chapter body is inserted as HTML.

use std::fmt::Write;

use folio_reader::view::{ChapterLink, LanguageButton, LinkView};
use folio_reader::{PageMeta, ReaderView};
use folio_renderer::escape_html as escape;

/// Stylesheet linked from every page.
const STYLESHEET: &str = "assets/styles.css";

/// All data needed to render a reader page.
pub struct PageData<'a> {
    pub view: &'a ReaderView,
    /// Head metadata; `None` falls back to the site title and description.
    pub meta: Option<&'a PageMeta>,
    /// Site description, used when there is no metadata.
    pub description: &'a str,
    /// Chapter content area, already HTML.
    pub body_html: &'a str,
}

/// Render a complete HTML document.
pub fn render_document(page: &PageData<'_>) -> String {
    let view = page.view;
    let mut html = String::with_capacity(8192 + page.body_html.len());

    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(
        html,
        "<html lang=\"{}\" dir=\"{}\">",
        escape(&view.document.lang),
        escape(&view.document.dir)
    );
    html.push_str("<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    render_head_meta(&mut html, page);
    let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{STYLESHEET}\">");
    html.push_str("</head>\n<body>\n");

    render_header(&mut html, view);

    html.push_str("<div class=\"layout\">\n");
    render_sidebar(&mut html, &view.contents_label, &view.chapters);

    html.push_str("<main class=\"chapter\">\n<article>\n");
    let _ = writeln!(
        html,
        "<h2 id=\"chapter-title\">{}</h2>",
        escape(view.chapter.title())
    );
    let _ = writeln!(
        html,
        "<p id=\"chapter-description\">{}</p>",
        escape(view.chapter.description())
    );
    html.push_str("<div id=\"chapter-content\" class=\"chapter-content\">\n");
    html.push_str(page.body_html);
    html.push_str("\n</div>\n</article>\n</main>\n</div>\n");

    let _ = writeln!(
        html,
        "<footer class=\"site-footer\">\n<p id=\"footer-text\">{}</p>\n</footer>",
        escape(&view.footer)
    );
    html.push_str("</body>\n</html>\n");
    html
}

/// Title, meta tags, canonical, alternates and JSON-LD.
fn render_head_meta(html: &mut String, page: &PageData<'_>) {
    let Some(meta) = page.meta else {
        let _ = writeln!(html, "<title>{}</title>", escape(&page.view.header.title));
        let _ = writeln!(
            html,
            "<meta name=\"description\" content=\"{}\">",
            escape(page.description)
        );
        html.push_str("<script type=\"application/ld+json\" id=\"structured-data\"></script>\n");
        return;
    };

    let _ = writeln!(html, "<title>{}</title>", escape(&meta.title));
    for tag in &meta.tags {
        let _ = writeln!(
            html,
            "<meta {}=\"{}\" content=\"{}\">",
            tag.kind.attribute(),
            escape(&tag.key),
            escape(&tag.content)
        );
    }
    let _ = writeln!(
        html,
        "<link rel=\"canonical\" href=\"{}\">",
        escape(&meta.canonical)
    );
    for alternate in &meta.alternates {
        let _ = writeln!(
            html,
            "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\">",
            escape(&alternate.hreflang),
            escape(&alternate.href)
        );
    }
    // JSON string escapes cannot contain a literal "</", only raw text can.
    let _ = writeln!(
        html,
        "<script type=\"application/ld+json\" id=\"structured-data\">\n{}\n</script>",
        meta.structured_data.replace("</", "<\\/")
    );
}

fn render_header(html: &mut String, view: &ReaderView) {
    html.push_str("<header class=\"site-header\" id=\"top\">\n");
    if let Some(logo) = &view.header.logo {
        let _ = writeln!(
            html,
            "<img id=\"site-logo\" class=\"site-logo\" src=\"{}\" alt=\"\">",
            escape(logo)
        );
    }
    let _ = writeln!(
        html,
        "<div class=\"site-branding\">\n<h1 id=\"site-title\">{}</h1>\n<p id=\"site-tagline\">{}</p>\n</div>",
        escape(&view.header.title),
        escape(&view.header.tagline)
    );
    render_links(html, &view.links);
    render_language_switcher(
        html,
        &view.language_switcher.label,
        &view.language_switcher.buttons,
    );
    html.push_str("</header>\n");
}

fn render_links(html: &mut String, links: &[LinkView]) {
    html.push_str("<nav class=\"site-nav\">\n<ul id=\"site-links\">\n");
    for link in links {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\" target=\"{}\" rel=\"{}\">{}</a></li>",
            escape(&link.url),
            escape(&link.target),
            escape(&link.rel),
            escape(&link.label)
        );
    }
    html.push_str("</ul>\n</nav>\n");
}

fn render_language_switcher(html: &mut String, label: &str, buttons: &[LanguageButton]) {
    let label = escape(label);
    let _ = writeln!(
        html,
        "<div id=\"language-switcher\" class=\"language-switcher\" aria-label=\"{label}\">"
    );
    let _ = writeln!(html, "<span class=\"language-switcher-label\">{label}</span>");
    for button in buttons {
        let current = bool_attr(button.current);
        let _ = writeln!(
            html,
            "<a class=\"language-button\" role=\"button\" href=\"{}\" hreflang=\"{}\" \
             aria-pressed=\"{current}\" aria-current=\"{current}\">{}</a>",
            escape(&button.href),
            escape(&button.code),
            escape(&button.label)
        );
    }
    html.push_str("</div>\n");
}

fn render_sidebar(html: &mut String, label: &str, chapters: &[ChapterLink]) {
    html.push_str("<aside class=\"sidebar\">\n");
    let _ = writeln!(html, "<h2 id=\"chapters-label\">{}</h2>", escape(label));
    html.push_str("<ol id=\"chapter-list\">\n");
    for chapter in chapters {
        let _ = writeln!(
            html,
            "<li><a class=\"chapter-button\" href=\"{}\" aria-current=\"{}\">{}</a></li>",
            escape(&chapter.href),
            bool_attr(chapter.current),
            escape(&chapter.title)
        );
    }
    html.push_str("</ol>\n</aside>\n");
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
