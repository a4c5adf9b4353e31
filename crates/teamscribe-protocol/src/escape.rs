//! Escaping of values embedded in service messages
//!
//! TeamCity reserves a small set of characters inside `##teamcity[...]`
//! attribute values. Every substituted value must be escaped before it is
//! placed into a message, and pipe-doubling must happen before any of the
//! other substitutions so that the escape marker itself is never re-escaped.
//! The single forward pass below gives that ordering for free: each input
//! character is inspected exactly once.

use std::borrow::Cow;

/// Escape a value for use inside a service message attribute.
///
/// Substitutions applied:
///
/// | input | output |
/// |-------|--------|
/// | `\|`  | `\|\|` |
/// | `'`   | `\|'`  |
/// | LF    | `\|n`  |
/// | CR    | `\|r`  |
/// | U+0086 | `\|x` |
/// | U+2028 | `\|l` |
/// | U+2029 | `\|p` |
/// | `[`   | `\|[`  |
/// | `]`   | `\|]`  |
///
/// Values without reserved characters are returned borrowed, unmodified.
#[must_use]
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.chars().any(is_reserved) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '|' => escaped.push_str("||"),
            '\'' => escaped.push_str("|'"),
            '\n' => escaped.push_str("|n"),
            '\r' => escaped.push_str("|r"),
            '\u{0086}' => escaped.push_str("|x"),
            '\u{2028}' => escaped.push_str("|l"),
            '\u{2029}' => escaped.push_str("|p"),
            '[' => escaped.push_str("|["),
            ']' => escaped.push_str("|]"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Whether a character must be escaped in an attribute value
fn is_reserved(c: char) -> bool {
    matches!(
        c,
        '|' | '\'' | '\n' | '\r' | '\u{0086}' | '\u{2028}' | '\u{2029}' | '[' | ']'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_value_is_borrowed() {
        let value = "Namespace.Fixture.Method";
        assert!(matches!(escape(value), Cow::Borrowed(_)));
        assert_eq!(escape(value), value);
    }

    #[test]
    fn test_pipe_is_doubled() {
        assert_eq!(escape("a|b"), "a||b");
    }

    #[test]
    fn test_quote() {
        assert_eq!(escape("it's"), "it|'s");
    }

    #[test]
    fn test_newlines() {
        assert_eq!(escape("line1\nline2\r"), "line1|nline2|r");
    }

    #[test]
    fn test_brackets() {
        assert_eq!(escape("[tag]"), "|[tag|]");
    }

    #[test]
    fn test_unicode_separators() {
        assert_eq!(escape("a\u{0086}b"), "a|xb");
        assert_eq!(escape("a\u{2028}b"), "a|lb");
        assert_eq!(escape("a\u{2029}b"), "a|pb");
    }

    #[test]
    fn test_pipe_before_other_rules() {
        // A pipe followed by a quote must become `|||'`, never `||||`:
        // the doubled pipe is not itself subject to the quote substitution.
        assert_eq!(escape("|'"), "|||'");
        // An already "escaped looking" input is escaped again, not passed through.
        assert_eq!(escape("|n"), "||n");
    }

    #[test]
    fn test_all_reserved_in_one_value() {
        assert_eq!(
            escape("|'\n\r\u{0086}\u{2028}\u{2029}[]"),
            "|||'|n|r|x|l|p|[|]"
        );
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_multibyte_passthrough() {
        assert_eq!(escape("日本語テスト"), "日本語テスト");
        assert_eq!(escape("emoji 🔥🚀"), "emoji 🔥🚀");
    }
}
