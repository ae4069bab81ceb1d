//! `\title{...}` directive scanning

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TITLE_RE: Regex = Regex::new(r"\\title\{([^}]+)\}").unwrap();
}

/// Return the text of the first `\title{...}` directive, if any
///
/// Nested braces are not supported, and directives inside comments are
/// matched like any other.
pub fn extract_title(source: &str) -> Option<&str> {
    TITLE_RE
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
