//! Utility Functions
//!
//! String helpers shared by the metadata builders.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").unwrap());

/// Split string at the first colon, trimming both halves.
///
/// Without a colon the provided defaults are returned.
pub fn split_at_colon(input: &str, default_values: (&str, &str)) -> (String, String) {
    split_at(input, ':', default_values)
}

fn split_at(input: &str, character: char, default_values: (&str, &str)) -> (String, String) {
    match input.find(character) {
        Some(char_index) => (
            input[..char_index].trim().to_string(),
            input[char_index + 1..].trim().to_string(),
        ),
        None => (default_values.0.to_string(), default_values.1.to_string()),
    }
}

/// Replace every non-word character with an underscore.
pub fn sanitize_identifier(name: &str) -> String {
    NON_WORD_REGEXP.replace_all(name, "_").into_owned()
}
