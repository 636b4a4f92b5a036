//! View model for the reader page.
//!
//! [`ReaderView::build`] turns a state into everything the page chrome
//! shows: header, navigation links, language switcher, chapter list and the
//! chapter heading. Links for switching language or chapter point at the
//! state the reducer would produce, so following one is the same as
//! dispatching the event.

use folio_book::{Book, Chapter};
use folio_storage::content_path;
use serde::Serialize;

use crate::state::{Event, State, reduce};

/// Shown when no chapter is selected.
pub const NO_CHAPTER_MESSAGE: &str = "No chapter selected.";
/// Shown when the chapter has no content in the active language.
pub const UNAVAILABLE_MESSAGE: &str = "This chapter is not available in the selected language yet.";

const DEFAULT_CONTENTS_LABEL: &str = "Contents";
const DEFAULT_LANGUAGE_LABEL: &str = "Languages";
const LINK_REL: &str = "noopener";
/// Anchor appended to navigation hrefs so the new page opens at the top.
const TOP_ANCHOR: &str = "#top";

/// Everything the page chrome displays for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderView {
    pub document: DocumentAttrs,
    pub header: Header,
    pub links: Vec<LinkView>,
    pub contents_label: String,
    pub language_switcher: LanguageSwitcher,
    pub chapters: Vec<ChapterLink>,
    pub chapter: ChapterView,
    pub footer: String,
}

/// Attributes of the root `<html>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentAttrs {
    pub lang: String,
    pub dir: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub title: String,
    pub tagline: String,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
    pub url: String,
    pub label: String,
    pub target: String,
    pub rel: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSwitcher {
    pub label: String,
    pub buttons: Vec<LanguageButton>,
}

/// One language switcher entry.
///
/// `current` drives both `aria-pressed` and `aria-current`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageButton {
    pub code: String,
    pub label: String,
    pub current: bool,
    pub href: String,
}

/// One chapter list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterLink {
    pub id: String,
    pub title: String,
    pub current: bool,
    pub href: String,
}

/// What the chapter area shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ChapterView {
    /// No chapter selected.
    NoneSelected,
    /// Chapter exists but has no content file for the language.
    Unavailable { title: String, description: String },
    /// Chapter content can be loaded from `content_path`.
    #[serde(rename_all = "camelCase")]
    Available {
        title: String,
        description: String,
        file: String,
        content_path: String,
    },
}

impl ChapterView {
    /// Heading text, empty when no chapter is selected.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::NoneSelected => "",
            Self::Unavailable { title, .. } | Self::Available { title, .. } => title,
        }
    }

    /// Description text, empty when no chapter is selected.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::NoneSelected => "",
            Self::Unavailable { description, .. } | Self::Available { description, .. } => {
                description
            }
        }
    }

    /// Placeholder paragraph text for chapters without loadable content.
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::NoneSelected => Some(NO_CHAPTER_MESSAGE),
            Self::Unavailable { .. } => Some(UNAVAILABLE_MESSAGE),
            Self::Available { .. } => None,
        }
    }
}

impl ReaderView {
    /// Build the view for `state`.
    ///
    /// `base` prefixes navigation hrefs, `year` fills the first `{year}` of the footer.
    #[must_use]
    pub fn build(book: &Book, state: &State, base: &str, year: i32) -> Self {
        let language = state.language();
        let site = &book.site;

        let document = book.language(language).map_or_else(
            || DocumentAttrs {
                lang: language.to_owned(),
                dir: "ltr".to_owned(),
            },
            |lang| DocumentAttrs {
                lang: lang.locale().to_owned(),
                dir: lang.direction().to_owned(),
            },
        );

        let header = Header {
            title: site.title.clone(),
            tagline: site.tagline.clone(),
            logo: site.logo.clone().filter(|logo| !logo.is_empty()),
        };

        let links = book
            .links
            .iter()
            .map(|link| LinkView {
                url: link.url.clone(),
                label: link.label.clone(),
                target: link.target().to_owned(),
                rel: LINK_REL.to_owned(),
            })
            .collect();

        let language_switcher = LanguageSwitcher {
            label: site
                .language_label
                .pick(language, DEFAULT_LANGUAGE_LABEL)
                .to_owned(),
            buttons: book
                .languages()
                .iter()
                .map(|lang| LanguageButton {
                    code: lang.code.clone(),
                    label: lang.label().to_owned(),
                    current: lang.code == language,
                    href: nav_href(
                        &reduce(book, state, Event::SelectLanguage(lang.code.clone())),
                        base,
                    ),
                })
                .collect(),
        };

        let chapters = book
            .chapters_for(language)
            .map(|chapter| ChapterLink {
                id: chapter.id.clone(),
                title: chapter.title(language).to_owned(),
                current: state.chapter() == Some(chapter.id.as_str()),
                href: nav_href(
                    &reduce(book, state, Event::SelectChapter(chapter.id.clone())),
                    base,
                ),
            })
            .collect();

        let chapter = state
            .chapter()
            .and_then(|id| book.chapter(id))
            .map_or(ChapterView::NoneSelected, |chapter| {
                chapter_view(book, chapter, language)
            });

        Self {
            document,
            header,
            links,
            contents_label: site
                .contents_label
                .pick(language, DEFAULT_CONTENTS_LABEL)
                .to_owned(),
            language_switcher,
            chapters,
            chapter,
            footer: site.footer.replacen("{year}", &year.to_string(), 1),
        }
    }
}

fn chapter_view(book: &Book, chapter: &Chapter, language: &str) -> ChapterView {
    let title = chapter.title(language).to_owned();
    let description = chapter
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(&book.site.description)
        .to_owned();

    match chapter.file_for(language) {
        Some(file) => ChapterView::Available {
            title,
            description,
            file: file.to_owned(),
            content_path: content_path(language, file),
        },
        None => ChapterView::Unavailable { title, description },
    }
}

fn nav_href(state: &State, base: &str) -> String {
    format!("{}{TOP_ANCHOR}", state.url(base))
}

#[cfg(test)]
mod tests {
    use folio_book::fixtures::{book_with_empty_language, sample_book};
    use pretty_assertions::assert_eq;

    use super::*;

    fn view(language: &str, chapter: Option<&str>) -> ReaderView {
        let book = sample_book();
        let state = State::from_query(&book, Some(language), chapter);
        ReaderView::build(&book, &state, "/", 2024)
    }

    #[test]
    fn test_document_attrs() {
        assert_eq!(
            view("ar", None).document,
            DocumentAttrs {
                lang: "ar".to_owned(),
                dir: "rtl".to_owned()
            }
        );
        assert_eq!(view("fr", None).document.lang, "fr-FR");
        assert_eq!(view("fr", None).document.dir, "ltr");
    }

    #[test]
    fn test_header_and_footer() {
        let v = view("en", None);
        assert_eq!(v.header.title, "Folio");
        assert_eq!(v.header.tagline, "A book in many languages");
        assert_eq!(v.header.logo.as_deref(), Some("assets/logo.svg"));
        assert_eq!(v.footer, "© 2024 Folio");
    }

    #[test]
    fn test_footer_replaces_first_year_only() {
        let mut book = sample_book();
        book.site.footer = "{year}-{year}".to_owned();
        let state = State::initial(&book);
        assert_eq!(ReaderView::build(&book, &state, "/", 2031).footer, "2031-{year}");
    }

    #[test]
    fn test_links() {
        let v = view("en", None);
        assert_eq!(
            v.links,
            vec![
                LinkView {
                    url: "https://github.com/example/folio".to_owned(),
                    label: "Source".to_owned(),
                    target: "_blank".to_owned(),
                    rel: "noopener".to_owned(),
                },
                LinkView {
                    url: "/about".to_owned(),
                    label: "About".to_owned(),
                    target: "_self".to_owned(),
                    rel: "noopener".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_labels_are_localized() {
        assert_eq!(view("fr", None).contents_label, "Sommaire");
        assert_eq!(view("fr", None).language_switcher.label, "Langues");
        assert_eq!(view("ar", None).contents_label, "Contents");
        assert_eq!(view("ar", None).language_switcher.label, "Languages");
    }

    #[test]
    fn test_language_buttons() {
        let v = view("fr", Some("intro"));
        let buttons = v.language_switcher.buttons;
        assert_eq!(
            buttons.iter().map(|b| b.label.as_str()).collect::<Vec<_>>(),
            vec!["English", "Français", "العربية"]
        );
        assert_eq!(
            buttons.iter().map(|b| b.current).collect::<Vec<_>>(),
            vec![false, true, false]
        );
        assert_eq!(buttons[0].href, "/?lang=en&chapter=intro#top");
        assert_eq!(buttons[1].href, "/?lang=fr&chapter=intro#top");
        assert_eq!(buttons[2].href, "/?lang=ar&chapter=history#top");
    }

    #[test]
    fn test_chapter_list_only_has_chapters_with_content() {
        let v = view("en", Some("basics"));
        assert_eq!(
            v.chapters,
            vec![
                ChapterLink {
                    id: "intro".to_owned(),
                    title: "Introduction".to_owned(),
                    current: false,
                    href: "/?lang=en&chapter=intro#top".to_owned(),
                },
                ChapterLink {
                    id: "basics".to_owned(),
                    title: "Basics".to_owned(),
                    current: true,
                    href: "/?lang=en&chapter=basics#top".to_owned(),
                },
                ChapterLink {
                    id: "history".to_owned(),
                    title: "History".to_owned(),
                    current: false,
                    href: "/?lang=en&chapter=history#top".to_owned(),
                },
            ]
        );
        assert_eq!(
            view("fr", None)
                .chapters
                .iter()
                .map(|c| c.id.as_str())
                .collect::<Vec<_>>(),
            vec!["intro"]
        );
    }

    #[test]
    fn test_chapter_available() {
        assert_eq!(
            view("fr", Some("intro")).chapter,
            ChapterView::Available {
                title: "Introduction FR".to_owned(),
                description: "Start here".to_owned(),
                file: "intro.md".to_owned(),
                content_path: "content/fr/intro.md".to_owned(),
            }
        );
    }

    #[test]
    fn test_chapter_description_falls_back_to_site() {
        let v = view("ar", Some("history"));
        assert_eq!(v.chapter.title(), "تاريخ");
        assert_eq!(v.chapter.description(), "Site description");
    }

    #[test]
    fn test_language_without_content_shows_placeholder() {
        let book = book_with_empty_language();
        let state = State::from_query(&book, Some("de"), None);
        let v = ReaderView::build(&book, &state, "/", 2024);
        assert!(v.chapters.is_empty());
        assert_eq!(
            v.chapter,
            ChapterView::Unavailable {
                title: "intro".to_owned(),
                description: "Start here".to_owned(),
            }
        );
        assert_eq!(v.chapter.placeholder(), Some(UNAVAILABLE_MESSAGE));
    }

    #[test]
    fn test_no_chapters_shows_none_selected() {
        let mut book = sample_book();
        book.chapters.clear();
        let state = State::initial(&book);
        let v = ReaderView::build(&book, &state, "/", 2024);
        assert_eq!(v.chapter, ChapterView::NoneSelected);
        assert_eq!(v.chapter.placeholder(), Some(NO_CHAPTER_MESSAGE));
        assert_eq!(v.chapter.title(), "");
    }

    #[test]
    fn test_build_is_idempotent() {
        let book = sample_book();
        let state = State::from_query(&book, Some("ar"), None);
        assert_eq!(
            ReaderView::build(&book, &state, "/", 2024),
            ReaderView::build(&book, &state, "/", 2024)
        );
    }

    #[test]
    fn test_serializes_chapter_status() {
        let json = serde_json::to_value(view("fr", Some("intro")).chapter).unwrap();
        assert_eq!(json["status"], "available");
        assert_eq!(json["contentPath"], "content/fr/intro.md");
    }
}
