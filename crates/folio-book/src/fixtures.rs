//! Sample book shared by tests across the workspace.

use crate::Book;

/// Three languages and four chapters.
///
/// - `intro`: `en`, `fr`
/// - `basics`: `en`
/// - `history`: `en`, `ar` (the `fr` entry is empty)
/// - `draft`: no content at all
pub const BOOK_JSON: &str = r#"{
  "site": {
    "title": "Folio",
    "tagline": "A book in many languages",
    "description": "Site description",
    "logo": "assets/logo.svg",
    "footer": "© {year} Folio",
    "baseUrl": "https://book.example.org/",
    "author": "Ada",
    "defaultLanguage": "en",
    "contentsLabel": { "en": "Contents", "fr": "Sommaire" },
    "languageLabel": { "default": "Languages", "fr": "Langues" },
    "seo": { "keywords": ["book", "reader"], "socialImage": "assets/cover.png", "twitter": "@folio" }
  },
  "languages": [
    { "code": "en", "label": "English", "locale": "en-US" },
    { "code": "fr", "label": "Français", "locale": "fr-FR" },
    { "code": "ar", "label": "العربية", "locale": "ar", "direction": "rtl" }
  ],
  "chapters": [
    { "id": "intro", "titles": { "en": "Introduction", "fr": "Introduction FR" }, "description": "Start here",
      "files": { "en": "intro.md", "fr": "intro.md" } },
    { "id": "basics", "titles": { "default": "Basics" }, "files": { "en": "basics.md" } },
    { "id": "history", "titles": { "en": "History", "ar": "تاريخ" }, "files": { "en": "history.md", "ar": "history.md", "fr": "" } },
    { "id": "draft", "titles": { "en": "Draft" } }
  ],
  "links": [
    { "url": "https://github.com/example/folio", "label": "Source" },
    { "url": "/about", "label": "About", "target": "_self" }
  ]
}"#;

/// Parse [`BOOK_JSON`].
///
/// # Panics
///
/// Panics if the fixture stops parsing.
#[must_use]
pub fn sample_book() -> Book {
    Book::from_json(BOOK_JSON).expect("fixture book parses")
}

/// A book where no chapter has content for `de`.
///
/// # Panics
///
/// Panics if the fixture stops parsing.
#[must_use]
pub fn book_with_empty_language() -> Book {
    let json = BOOK_JSON.replace(
        r#"{ "code": "ar", "label": "العربية", "locale": "ar", "direction": "rtl" }"#,
        r#"{ "code": "ar", "label": "العربية", "locale": "ar", "direction": "rtl" },
    { "code": "de", "label": "Deutsch", "locale": "de-DE" }"#,
    );
    Book::from_json(&json).expect("fixture book parses")
}
