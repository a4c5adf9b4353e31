// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for attribute value escaping
//!
//! The escaper must never panic and must never leave a bare reserved
//! character in its output.

#![no_main]

use libfuzzer_sys::fuzz_target;

use teamscribe_protocol::escape;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let escaped = escape(input);
        let mut chars = escaped.chars();
        while let Some(c) = chars.next() {
            match c {
                '|' => {
                    assert!(matches!(
                        chars.next(),
                        Some('|' | '\'' | 'n' | 'r' | 'x' | 'l' | 'p' | '[' | ']')
                    ));
                }
                '\'' | '\n' | '\r' | '\u{0086}' | '\u{2028}' | '\u{2029}' | '[' | ']' => {
                    panic!("unescaped reserved character");
                }
                _ => {}
            }
        }
    }
});
