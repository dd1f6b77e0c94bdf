//! Lexical discovery of email-like tokens in arbitrary text

use regex::Regex;
use std::sync::LazyLock;

// The local part takes any letter or digit, accented ones included, and
// never starts with a dot. The leading group stands in for a look-behind:
// a token only starts after a character that cannot belong to it, so a
// name like `joão.silva` is never cut down to `.silva` or `silva`.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^\p{L}\p{N}_%+-])([\p{L}\p{N}_%+-][\p{L}\p{N}._%+-]*@[a-z0-9.-]+\.[a-z]{2,})\b",
    )
    .unwrap()
});

/// Lazily yield every email-shaped substring of `text`, left to right.
///
/// Tokens keep their original case; nothing is validated beyond shape.
pub fn extract_tokens(text: &str) -> impl Iterator<Item = &str> {
    EMAIL_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}
