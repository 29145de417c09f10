//! URL Resolver
//!
//! Only the scheme extraction is needed by the metadata layer; full URL
//! resolution lives with the resource loader.

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex to match a URL scheme
static URL_WITH_SCHEMA_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^:/?#]+):").unwrap());

/// Extract the scheme of `url` (`package`, `asset`, `http`, ...).
///
/// Relative and absolute paths have no scheme.
pub fn get_url_scheme(url: &str) -> Option<&str> {
    URL_WITH_SCHEMA_REGEXP
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
