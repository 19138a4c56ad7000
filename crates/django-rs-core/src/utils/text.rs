//! String utility functions.
//!
//! These helpers derive Rust-style type names from Django-style field and
//! model names (e.g. `status_code` -> `StatusCode`).

use regex::Regex;
use std::sync::OnceLock;

/// Capitalizes the first character of a string.
///
/// # Examples
///
/// ```
/// use django_rs_core::utils::text::capfirst;
///
/// assert_eq!(capfirst("hello"), "Hello");
/// assert_eq!(capfirst(""), "");
/// assert_eq!(capfirst("HELLO"), "HELLO");
/// ```
pub fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |c| {
        let mut result = c.to_uppercase().to_string();
        result.extend(chars);
        result
    })
}

/// Converts a snake_case (or otherwise delimited) identifier to PascalCase.
///
/// Any run of characters that are not ASCII letters or digits acts as a word
/// separator. Existing capitals inside a word are preserved.
///
/// # Examples
///
/// ```
/// use django_rs_core::utils::text::pascal_case;
///
/// assert_eq!(pascal_case("status_code"), "StatusCode");
/// assert_eq!(pascal_case("field"), "Field");
/// assert_eq!(pascal_case("order-type 2"), "OrderType2");
/// ```
pub fn pascal_case(s: &str) -> String {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    let separator = SEPARATOR.get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

    separator
        .split(s)
        .filter(|word| !word.is_empty())
        .map(capfirst)
        .collect()
}
