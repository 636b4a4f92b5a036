//! Reader state and its reducer.
//!
//! A [`State`] is the `(language, chapter)` pair the reader shows. States are
//! only produced by [`State::initial`] and [`reduce`], which keep two
//! invariants:
//!
//! - the language is always a configured language;
//! - the chapter, when set, exists and has content for the language whenever
//!   any chapter does.

use folio_book::Book;
use folio_book::url::page_url;
use serde::Serialize;

/// The language and chapter currently shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct State {
    language: String,
    chapter: Option<String>,
}

/// Something that changes what the reader shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Page load with `lang`/`chapter` query parameters.
    Navigate {
        language: Option<String>,
        chapter: Option<String>,
    },
    /// Language switcher button.
    SelectLanguage(String),
    /// Chapter list entry.
    SelectChapter(String),
}

impl State {
    /// State before any URL parameters are applied.
    ///
    /// Default language with the first declared chapter, normalized.
    #[must_use]
    pub fn initial(book: &Book) -> Self {
        let start = Self::unresolved(book);
        normalize(book, start.language, start.chapter)
    }

    /// State for a page request carrying `lang` and `chapter` parameters.
    ///
    /// Unknown or missing values are ignored. The fallback chapter is chosen
    /// once, for the requested language, starting from the first declared
    /// chapter.
    #[must_use]
    pub fn from_query(book: &Book, language: Option<&str>, chapter: Option<&str>) -> Self {
        reduce(
            book,
            &Self::unresolved(book),
            Event::Navigate {
                language: language.map(str::to_owned),
                chapter: chapter.map(str::to_owned),
            },
        )
    }

    /// Default language and first declared chapter, not yet normalized.
    fn unresolved(book: &Book) -> Self {
        Self {
            language: book.default_language().code.clone(),
            chapter: book.chapters.first().map(|c| c.id.clone()),
        }
    }

    /// Active language code.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Active chapter id, if any.
    #[must_use]
    pub fn chapter(&self) -> Option<&str> {
        self.chapter.as_deref()
    }

    /// Page URL for this state on top of `base`.
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        page_url(base, &self.language, self.chapter())
    }
}

/// Compute the state after `event`.
///
/// Pure: never fails, and invalid requests leave the state unchanged.
#[must_use]
pub fn reduce(book: &Book, state: &State, event: Event) -> State {
    match event {
        Event::Navigate { language, chapter } => {
            let language = language
                .filter(|code| book.has_language(code))
                .unwrap_or_else(|| state.language.clone());
            let chapter = chapter
                .filter(|id| book.chapter(id).is_some())
                .or_else(|| state.chapter.clone());
            normalize(book, language, chapter)
        }
        Event::SelectLanguage(code) => {
            if code == state.language {
                return state.clone();
            }
            if !book.has_language(&code) {
                tracing::debug!(language = %code, "Ignoring unknown language");
                return state.clone();
            }
            normalize(book, code, state.chapter.clone())
        }
        Event::SelectChapter(id) => {
            if state.chapter.as_deref() == Some(id.as_str()) {
                return state.clone();
            }
            if !book.chapter_has_content(&id, &state.language) {
                tracing::debug!(
                    chapter = %id,
                    language = %state.language,
                    "Ignoring chapter without content"
                );
                return state.clone();
            }
            State {
                language: state.language.clone(),
                chapter: Some(id),
            }
        }
    }
}

/// Move to the first chapter with content when the selection has none.
///
/// When no chapter has content for the language the selection is kept.
fn normalize(book: &Book, language: String, chapter: Option<String>) -> State {
    let keep = chapter
        .as_deref()
        .is_some_and(|id| book.chapter_has_content(id, &language));
    let chapter = if keep {
        chapter
    } else {
        book.first_chapter_with_content(&language)
            .map(|c| c.id.clone())
            .or(chapter)
    };
    State { language, chapter }
}
