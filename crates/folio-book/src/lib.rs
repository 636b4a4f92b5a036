//! Book descriptor for Folio.
//!
//! A book is described by one JSON document with four sections:
//!
//! ```json
//! {
//!   "site": { "title": "...", "baseUrl": "https://...", "defaultLanguage": "en" },
//!   "languages": [{ "code": "en", "label": "English", "locale": "en-US", "direction": "ltr" }],
//!   "chapters": [{ "id": "intro", "titles": { "en": "Introduction" }, "files": { "en": "intro.md" } }],
//!   "links": [{ "url": "https://github.com/...", "label": "Source" }]
//! }
//! ```
//!
//! [`Book`] is immutable once loaded. Language and chapter order is the
//! declaration order and is significant: the first language is the fallback
//! default, and the first chapter with content in a language is the fallback
//! chapter for it.

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
mod localized;
pub mod url;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use localized::LocalizedText;

/// Book loading error.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    /// The descriptor could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Descriptor path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The descriptor is not valid JSON for the book schema.
    #[error("Invalid book configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// The descriptor parsed but breaks an invariant.
    #[error("Book configuration error: {0}")]
    Validation(String),
}

/// The whole book descriptor.
///
/// Only built through [`Book::from_json`], [`Book::load`] or serde, all of
/// which validate, so there is always at least one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BookFile")]
pub struct Book {
    /// Site-wide metadata.
    pub site: SiteMeta,
    /// Languages in declaration order.
    languages: Vec<Language>,
    /// Chapters in declaration order.
    pub chapters: Vec<Chapter>,
    /// Navigation links shown in the header.
    pub links: Vec<Link>,
}

/// The descriptor as written, before validation.
#[derive(Deserialize)]
struct BookFile {
    site: SiteMeta,
    #[serde(default)]
    languages: Vec<Language>,
    #[serde(default)]
    chapters: Vec<Chapter>,
    #[serde(default)]
    links: Vec<Link>,
    /// SEO settings at the top level, used when `site.seo` is absent.
    #[serde(default)]
    seo: Option<Seo>,
}

impl TryFrom<BookFile> for Book {
    type Error = BookError;

    fn try_from(file: BookFile) -> Result<Self, BookError> {
        let mut site = file.site;
        if site.seo.is_none() {
            site.seo = file.seo;
        }
        let book = Self {
            site,
            languages: file.languages,
            chapters: file.chapters,
            links: file.links,
        };
        book.validate()?;
        Ok(book)
    }
}

/// Site-wide metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteMeta {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub logo: Option<String>,
    /// Footer text; the first `{year}` is replaced with the current year.
    pub footer: String,
    pub base_url: Option<String>,
    pub author: String,
    pub default_language: Option<String>,
    pub contents_label: LocalizedText,
    pub language_label: LocalizedText,
    pub seo: Option<Seo>,
}

/// Search engine and social sharing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Seo {
    pub keywords: Vec<String>,
    pub social_image: Option<String>,
    /// Twitter handle, e.g. `@folio`.
    pub twitter: Option<String>,
}

/// A display language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
}

impl Language {
    /// Label for the switcher, falling back to the code.
    pub fn label(&self) -> &str {
        non_empty(self.label.as_deref()).unwrap_or(&self.code)
    }

    /// Locale used for `lang` and `hreflang`, falling back to the code.
    pub fn locale(&self) -> &str {
        non_empty(self.locale.as_deref()).unwrap_or(&self.code)
    }

    /// Text direction, `ltr` unless configured.
    pub fn direction(&self) -> &str {
        non_empty(self.direction.as_deref()).unwrap_or("ltr")
    }
}

/// A unit of book content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    #[serde(default)]
    pub titles: LocalizedText,
    #[serde(default)]
    pub description: Option<String>,
    /// Content file name per language code.
    #[serde(default)]
    pub files: BTreeMap<String, String>,
}

impl Chapter {
    /// Content file for `language`, if one is defined.
    pub fn file_for(&self, language: &str) -> Option<&str> {
        non_empty(self.files.get(language).map(String::as_str))
    }

    /// Whether the chapter has a content file for `language`.
    pub fn has_content(&self, language: &str) -> bool {
        self.file_for(language).is_some()
    }

    /// Localized title, falling back to the chapter id.
    pub fn title(&self, language: &str) -> &str {
        self.titles.pick(language, &self.id)
    }
}

/// A header navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub label: String,
    #[serde(default)]
    pub target: Option<String>,
}

impl Link {
    /// Link target, `_blank` unless configured.
    pub fn target(&self) -> &str {
        non_empty(self.target.as_deref()).unwrap_or("_blank")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl Book {
    /// Load and validate a book descriptor from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, BookError> {
        let json = std::fs::read_to_string(path).map_err(|source| BookError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let book = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            languages = book.languages.len(),
            chapters = book.chapters.len(),
            "Loaded book configuration"
        );
        Ok(book)
    }

    /// Parse and validate a book descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, BookError> {
        let file: BookFile = serde_json::from_str(json)?;
        Self::try_from(file)
    }

    /// Override the public base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.site.base_url = Some(base_url.into());
        self
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// Returns `BookError::Validation` when there are no languages, or when a
    /// language code or chapter id is empty or duplicated.
    pub fn validate(&self) -> Result<(), BookError> {
        if self.languages.is_empty() {
            return Err(BookError::Validation(
                "at least one language must be configured".to_owned(),
            ));
        }

        let mut codes = HashSet::new();
        for language in &self.languages {
            if language.code.is_empty() {
                return Err(BookError::Validation(
                    "language code cannot be empty".to_owned(),
                ));
            }
            if !codes.insert(language.code.as_str()) {
                return Err(BookError::Validation(format!(
                    "duplicate language code '{}'",
                    language.code
                )));
            }
        }

        let mut ids = HashSet::new();
        for chapter in &self.chapters {
            if chapter.id.is_empty() {
                return Err(BookError::Validation("chapter id cannot be empty".to_owned()));
            }
            if !ids.insert(chapter.id.as_str()) {
                return Err(BookError::Validation(format!(
                    "duplicate chapter id '{}'",
                    chapter.id
                )));
            }
            for code in chapter.files.keys() {
                if !codes.contains(code.as_str()) {
                    tracing::warn!(
                        chapter = %chapter.id,
                        language = %code,
                        "Chapter file references an unconfigured language"
                    );
                }
            }
        }

        Ok(())
    }

    /// Languages in declaration order, never empty.
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// SEO settings, if any were configured.
    pub fn seo(&self) -> Option<&Seo> {
        self.site.seo.as_ref()
    }

    /// Look up a language by code.
    pub fn language(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.code == code)
    }

    /// Whether `code` is a configured language.
    pub fn has_language(&self, code: &str) -> bool {
        self.language(code).is_some()
    }

    /// Look up a chapter by id.
    pub fn chapter(&self, id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    /// Whether chapter `id` exists and has content for `language`.
    pub fn chapter_has_content(&self, id: &str, language: &str) -> bool {
        self.chapter(id).is_some_and(|c| c.has_content(language))
    }

    /// First chapter, in declaration order, with content for `language`.
    pub fn first_chapter_with_content(&self, language: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.has_content(language))
    }

    /// Chapters with content for `language`, in declaration order.
    pub fn chapters_for<'a>(&'a self, language: &'a str) -> impl Iterator<Item = &'a Chapter> {
        self.chapters.iter().filter(move |c| c.has_content(language))
    }

    /// `requested` when it is configured, otherwise the first language.
    pub fn resolve_language(&self, requested: Option<&str>) -> &Language {
        requested
            .and_then(|code| self.language(code))
            .unwrap_or_else(|| self.first_language())
    }

    /// First declared language; validation guarantees one exists.
    fn first_language(&self) -> &Language {
        &self.languages[0]
    }

    /// The configured default language, resolved.
    pub fn default_language(&self) -> &Language {
        self.resolve_language(self.site.default_language.as_deref())
    }
}
