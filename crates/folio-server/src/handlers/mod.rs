//! HTTP request handlers.

pub(crate) mod pages;
pub(crate) mod sitemap;
pub(crate) mod view;

use chrono::{Datelike, Utc};
use folio_book::url::{CHAPTER_PARAM, LANG_PARAM};
use folio_site::PageRequest;
use url::form_urlencoded;

/// Parse `lang` and `chapter` from a raw query string.
///
/// The first occurrence of each parameter wins; anything else is ignored,
/// so a malformed query never fails the request.
pub(crate) fn page_request(query: Option<&str>) -> PageRequest {
    let mut request = PageRequest::default();
    for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
        if key == LANG_PARAM && request.lang.is_none() {
            request.lang = Some(value.into_owned());
        } else if key == CHAPTER_PARAM && request.chapter.is_none() {
            request.chapter = Some(value.into_owned());
        }
    }
    request
}

/// Year substituted into the footer.
pub(crate) fn current_year() -> i32 {
    Utc::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_first_occurrence_wins() {
        let request = page_request(Some("lang=fr&chapter=intro&lang=en&x=1"));
        assert_eq!(request, PageRequest::new(Some("fr"), Some("intro")));
    }

    #[test]
    fn test_page_request_decodes_values() {
        let request = page_request(Some("chapter=a%20b+c"));
        assert_eq!(request, PageRequest::new(None, Some("a b c")));
    }

    #[test]
    fn test_page_request_empty() {
        assert_eq!(page_request(None), PageRequest::default());
        assert_eq!(page_request(Some("&&=")), PageRequest::default());
    }
}
