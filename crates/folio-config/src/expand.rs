//! `${VAR}` and `${VAR:-default}` references in configuration strings.
//!
//! Only braced references are expanded. A bare `$` is kept as written, even
//! next to a braced reference, so URLs like `https://${HOST}/$path` survive.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand every braced reference in `value`.
///
/// `field` names the setting in the error for an unset variable without a
/// default. An unterminated `${` is kept literally.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let reference = &rest[start..=start + len];
        expanded.push_str(&rest[..start]);
        expanded.push_str(&expand_reference(reference, field)?);
        rest = &rest[start + len + 1..];
    }

    expanded.push_str(rest);
    Ok(expanded)
}

/// Expand a single `${...}` token with shellexpand.
fn expand_reference(reference: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(reference, |name| match std::env::var(name) {
        Ok(found) => Ok(Some(found)),
        Err(_) => Err(name.to_owned()),
    })
    .map(Cow::into_owned)
    .map_err(|err| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", err.cause),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_base_url_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_SITE", "https://book.example.org");
        }
        let result = expand_env("${FOLIO_TEST_SITE}/", "book.base_url").unwrap();
        assert_eq!(result, "https://book.example.org/");
        unsafe {
            std::env::remove_var("FOLIO_TEST_SITE");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_TEST_UNSET_HOST");
        }
        let result = expand_env("${FOLIO_TEST_UNSET_HOST:-0.0.0.0}", "server.host").unwrap();
        assert_eq!(result, "0.0.0.0");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_TEST_MISSING");
        }
        let err = expand_env("${FOLIO_TEST_MISSING}", "book.base_url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("FOLIO_TEST_MISSING"));
        assert!(err.to_string().contains("book.base_url"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("https://example.com/$path", "book.base_url").unwrap();
        assert_eq!(result, "https://example.com/$path");
    }

    #[test]
    fn test_bare_dollar_kept_next_to_braced_reference() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_MIXED_HOST", "book.example.org");
        }
        let result = expand_env("https://${FOLIO_TEST_MIXED_HOST}/$path", "book.base_url").unwrap();
        assert_eq!(result, "https://book.example.org/$path");
        unsafe {
            std::env::remove_var("FOLIO_TEST_MIXED_HOST");
        }
    }

    #[test]
    fn test_unterminated_reference_is_literal() {
        let result = expand_env("https://${HOST", "book.base_url").unwrap();
        assert_eq!(result, "https://${HOST");
    }
}
