//! Scheme-name grammar and scheme extraction.
//!
//! A scheme name starts with an ASCII letter followed by any number of ASCII
//! letters, digits, `+`, `-`, or `.` (RFC 3986 §3.1).
//!
//! # Examples
//!
//! ```
//! use uri_scheme_core::{is_valid_scheme_grammar, split_scheme};
//!
//! assert!(is_valid_scheme_grammar("net.tcp"));
//! assert!(!is_valid_scheme_grammar("1bad"));
//!
//! assert_eq!(split_scheme("mailto:someone@example.com"), Some("mailto"));
//! assert_eq!(split_scheme("/docs/index.html"), None);
//! ```

/// Returns `true` if `text` satisfies the scheme-name grammar.
///
/// The check is applied to `text` as given; callers trim first.
pub fn is_valid_scheme_grammar(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Extracts the scheme component of URI-like text.
///
/// Returns the prefix before the first `:` when that prefix is non-empty,
/// contains no `/`, `?` or `#`, and passes [`is_valid_scheme_grammar`].
/// Anything else is a relative reference and yields `None`.
///
/// # Examples
///
/// ```
/// use uri_scheme_core::split_scheme;
///
/// assert_eq!(split_scheme("  https://example.com/a?b#c "), Some("https"));
/// assert_eq!(split_scheme("net.pipe://localhost/svc"), Some("net.pipe"));
/// assert_eq!(split_scheme("docs/a:b"), None);
/// assert_eq!(split_scheme("?q=a:b"), None);
/// ```
pub fn split_scheme(uri_text: &str) -> Option<&str> {
    let text = uri_text.trim();
    let end = text.find([':', '/', '?', '#'])?;
    if !text[end..].starts_with(':') {
        return None;
    }
    let candidate = &text[..end];
    is_valid_scheme_grammar(candidate).then_some(candidate)
}

/// Case-insensitive equality used for every registry lookup.
pub(crate) fn scheme_eq(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
