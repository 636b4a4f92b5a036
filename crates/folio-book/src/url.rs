//! Page and asset URL building.
//!
//! Reader pages are addressed by `lang` and `chapter` query parameters on top
//! of a base URL. Absolute bases go through [`Url`] so existing query
//! parameters and fragments survive; anything else is treated as a relative
//! path and gets a plain form-encoded query appended.

use url::{Url, form_urlencoded};

/// Query parameter carrying the language code.
pub const LANG_PARAM: &str = "lang";
/// Query parameter carrying the chapter id.
pub const CHAPTER_PARAM: &str = "chapter";

/// Build the URL of the page showing `chapter` in `language`.
///
/// # Examples
///
/// ```
/// use folio_book::url::page_url;
///
/// assert_eq!(
///     page_url("https://book.example.org/", "fr", Some("intro")),
///     "https://book.example.org/?lang=fr&chapter=intro"
/// );
/// assert_eq!(page_url("", "en", Some("intro")), ".?lang=en&chapter=intro");
/// ```
pub fn page_url(base: &str, language: &str, chapter: Option<&str>) -> String {
    if let Ok(mut url) = Url::parse(base) {
        set_query_param(&mut url, LANG_PARAM, language);
        if let Some(chapter) = chapter {
            set_query_param(&mut url, CHAPTER_PARAM, chapter);
        }
        return url.into();
    }

    let path = base
        .find(|c| c == '?' || c == '#')
        .map_or(base, |end| &base[..end]);
    let path = if path.is_empty() { "." } else { path };

    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair(LANG_PARAM, language);
    if let Some(chapter) = chapter {
        query.append_pair(CHAPTER_PARAM, chapter);
    }
    format!("{path}?{}", query.finish())
}

/// Replace every `key` parameter with a single `key=value`, keeping the rest.
fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    for (k, v) in &retained {
        pairs.append_pair(k, v);
    }
    pairs.append_pair(key, value);
}

/// Whether `url` starts with an `http://` or `https://` scheme.
pub fn is_http_url(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Ensure an http(s) base URL ends with a slash.
///
/// Empty and non-http values are returned unchanged.
pub fn normalise_base_url(url: &str) -> String {
    if url.is_empty() || !is_http_url(url) || url.ends_with('/') {
        return url.to_owned();
    }
    format!("{url}/")
}

/// Resolve an asset path (logo, social image) against `base`.
///
/// Absolute http(s) paths are returned unchanged, as is anything that cannot
/// be joined onto `base`.
pub fn resolve_asset_url(path: &str, base: &str) -> String {
    if is_http_url(path) {
        return path.to_owned();
    }
    Url::parse(base)
        .and_then(|base| base.join(path))
        .map_or_else(|_| path.to_owned(), String::from)
}
