//! Per-language text with a `default` entry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key used for the language-independent entry.
const DEFAULT_KEY: &str = "default";

/// Text keyed by language code.
///
/// Accepts either a JSON object (`{"en": "Contents", "default": "Contents"}`)
/// or a plain string, which applies to every language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LocalizedRepr")]
pub struct LocalizedText(BTreeMap<String, String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum LocalizedRepr {
    Plain(String),
    Map(BTreeMap<String, String>),
}

impl From<LocalizedRepr> for LocalizedText {
    fn from(repr: LocalizedRepr) -> Self {
        match repr {
            LocalizedRepr::Plain(text) => Self(BTreeMap::from([(DEFAULT_KEY.to_owned(), text)])),
            LocalizedRepr::Map(map) => Self(map),
        }
    }
}

impl LocalizedText {
    /// Pick the text for `language`, then the `default` entry, then `fallback`.
    ///
    /// Empty entries count as missing.
    pub fn pick<'a>(&'a self, language: &str, fallback: &'a str) -> &'a str {
        self.get_non_empty(language)
            .or_else(|| self.get_non_empty(DEFAULT_KEY))
            .unwrap_or(fallback)
    }

    fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
