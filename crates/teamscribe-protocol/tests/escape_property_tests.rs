// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property-based tests for service message escaping
//!
//! The escaper must be invertible: applying the inverse substitution to the
//! escaped output reproduces the original value exactly, for arbitrary input.

use proptest::prelude::*;

use teamscribe_protocol::escape;

/// Inverse of the escaper: decode `|`-prefixed escape pairs.
///
/// Only used by tests; the production protocol is write-only.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '|' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('|') => out.push('|'),
            Some('\'') => out.push('\''),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('x') => out.push('\u{0086}'),
            Some('l') => out.push('\u{2028}'),
            Some('p') => out.push('\u{2029}'),
            Some('[') => out.push('['),
            Some(']') => out.push(']'),
            // Dangling or unknown escape: keep the raw characters so the
            // mismatch shows up in the round-trip assertion.
            Some(other) => {
                out.push('|');
                out.push(other);
            }
            None => out.push('|'),
        }
    }
    out
}

/// Strings biased toward the reserved characters
fn reserved_heavy_string() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("|".to_string()),
        Just("||".to_string()),
        Just("|'".to_string()),
        Just("|n".to_string()),
        Just("['quoted']".to_string()),
        Just("line1\nline2\rline3".to_string()),
        Just("\u{0086}\u{2028}\u{2029}".to_string()),
        Just("Tests[0].It's |odd|".to_string()),
        "[|'\\[\\]\n\ra-z]{0,40}",
        ".*",
    ]
}

proptest! {
    #[test]
    fn prop_escape_round_trips(value in reserved_heavy_string()) {
        let escaped = escape(&value);
        prop_assert_eq!(unescape(&escaped), value);
    }

    #[test]
    fn prop_escaped_output_has_no_bare_reserved_chars(value in ".*") {
        let escaped = escape(&value);
        // Every reserved character in the output must be part of an escape
        // pair introduced by a pipe.
        let mut chars = escaped.chars();
        while let Some(c) = chars.next() {
            match c {
                '|' => {
                    let next = chars.next();
                    prop_assert!(
                        matches!(next, Some('|' | '\'' | 'n' | 'r' | 'x' | 'l' | 'p' | '[' | ']')),
                        "dangling escape introducer before {:?}", next
                    );
                }
                '\'' | '\n' | '\r' | '\u{0086}' | '\u{2028}' | '\u{2029}' | '[' | ']' => {
                    prop_assert!(false, "unescaped reserved character {:?}", c);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn prop_escape_is_identity_on_clean_input(value in "[a-zA-Z0-9 ._:-]{0,60}") {
        prop_assert_eq!(escape(&value).as_ref(), value.as_str());
    }
}
